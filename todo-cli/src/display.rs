//! Terminal rendering of the controller's state.

use client::{Controller, Row, Status, StatusKind, TokenStore, ViewState};
use colored::Colorize;

/// Prints a status line: gold on stdout for info, red on stderr for errors.
pub fn print_status(status: &Status) {
    if status.text.is_empty() {
        return;
    }
    match status.kind {
        StatusKind::Info => println!("{}", status.text.truecolor(255, 215, 0)),
        StatusKind::Error => eprintln!("{}", status.text.truecolor(255, 107, 107)),
    }
}

/// Heading of a panel.
pub fn panel_title(view: ViewState) -> &'static str {
    match view {
        ViewState::Signup => "Sign up",
        ViewState::Signin => "Sign in",
        ViewState::TodoList => "Your todos",
    }
}

/// Plain-text form of one list row.
pub fn format_row(row: &Row) -> String {
    match row {
        Row::Placeholder(text) => format!("  {text}"),
        Row::Item(item) => format!(
            "{:>3}. [{}] {}  (id: {})",
            item.position,
            if item.done { "x" } else { " " },
            item.label,
            item.record.id
        ),
    }
}

/// Prints the rendered list; finished items are dimmed and struck through.
pub fn print_rows(rows: &[Row]) {
    for row in rows {
        let line = format_row(row);
        match row {
            Row::Item(item) if item.done => println!("{}", line.strikethrough().dimmed()),
            Row::Placeholder(_) => println!("{}", line.dimmed()),
            Row::Item(_) => println!("{line}"),
        }
    }
}

/// Prints the current panel with its available commands.
pub fn print_panel<S: TokenStore>(controller: &Controller<S>) {
    let view = controller.view();
    println!("{}", panel_title(view).bold());
    match view {
        ViewState::Signup => {
            println!("  submit <name> <email> [password]   create the account");
            println!("  show-signin                        already registered? sign in");
        }
        ViewState::Signin => {
            println!("  submit <email> [password]          sign in");
            println!("  show-signup                        no account yet? sign up");
        }
        ViewState::TodoList => {
            print_rows(controller.rows());
            println!(
                "  add <title> | toggle <n> | delete <n> | refresh | logout"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::render_todos;
    use shared::models::TodoRecord;

    #[test]
    fn test_format_rows() {
        let rows = render_todos(&[
            TodoRecord::new("a1", "Buy milk", false),
            TodoRecord::new("b2", "", true),
        ]);
        assert_eq!(format_row(&rows[0]), "  1. [ ] Buy milk  (id: a1)");
        assert_eq!(format_row(&rows[1]), "  2. [x] (no title)  (id: b2)");
    }

    #[test]
    fn test_format_placeholder() {
        let rows = render_todos(&[]);
        assert_eq!(format_row(&rows[0]), "  No todos yet, add your first task");
    }

    #[test]
    fn test_panel_titles() {
        assert_eq!(panel_title(ViewState::Signin), "Sign in");
        assert_eq!(panel_title(ViewState::TodoList), "Your todos");
    }
}
