//! Interactive loop driving the controller one panel at a time.

use std::io::{self, Write};

use anyhow::{Context, Result};
use client::{
    Controller, LoginForm, Row, SignupForm, Status, TodoForm, TodoRow, TokenStore, ViewState,
};

use super::{session::password_or_prompt, todos::confirm};
use crate::display;

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    SubmitSignup {
        name: String,
        email: String,
        password: Option<String>,
    },
    SubmitLogin {
        email: String,
        password: Option<String>,
    },
    ShowSignup,
    ShowSignin,
    Add(String),
    Toggle(usize),
    Delete(usize),
    Refresh,
    Logout,
    Help,
    Quit,
}

/// Maps the words of one line to a command available on `view`.
pub fn parse_command(view: ViewState, words: &[String]) -> Result<ShellCommand, String> {
    let Some((head, rest)) = words.split_first() else {
        return Ok(ShellCommand::Help);
    };
    let arg = |index: usize| rest.get(index).cloned().unwrap_or_default();

    let command = match (head.as_str(), view) {
        ("help" | "?", _) => ShellCommand::Help,
        ("quit" | "exit", _) => ShellCommand::Quit,
        ("submit", ViewState::Signup) => ShellCommand::SubmitSignup {
            name: arg(0),
            email: arg(1),
            password: rest.get(2).cloned(),
        },
        ("submit", ViewState::Signin) => ShellCommand::SubmitLogin {
            email: arg(0),
            password: rest.get(1).cloned(),
        },
        ("show-signup", ViewState::Signin | ViewState::Signup) => ShellCommand::ShowSignup,
        ("show-signin", ViewState::Signin | ViewState::Signup) => ShellCommand::ShowSignin,
        ("add", ViewState::TodoList) => ShellCommand::Add(rest.join(" ")),
        ("toggle", ViewState::TodoList) => ShellCommand::Toggle(position(rest)?),
        ("delete", ViewState::TodoList) => ShellCommand::Delete(position(rest)?),
        ("refresh", ViewState::TodoList) => ShellCommand::Refresh,
        ("logout", ViewState::TodoList) => ShellCommand::Logout,
        (other, view) => {
            return Err(format!(
                "Unknown command '{other}' on the {} panel, type 'help'",
                display::panel_title(view)
            ));
        }
    };
    Ok(command)
}

fn position(rest: &[String]) -> Result<usize, String> {
    let raw = rest.first().ok_or("Expected a row number")?;
    raw.parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("'{raw}' is not a row number"))
}

/// Runs the shell until `quit` or end of input.
pub async fn run<S: TokenStore>(controller: &mut Controller<S>) -> Result<bool> {
    controller.bootstrap().await;
    display::print_panel(controller);

    while let Some(line) = read_line("> ")? {
        let Some(words) = shlex::split(&line) else {
            display::print_status(&Status::error("Unbalanced quotes"));
            continue;
        };
        if words.is_empty() {
            continue;
        }

        let command = match parse_command(controller.view(), &words) {
            Ok(command) => command,
            Err(message) => {
                display::print_status(&Status::error(message));
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        let view_before = controller.view();
        if execute(controller, command).await? || controller.view() != view_before {
            display::print_panel(controller);
        }
    }
    Ok(true)
}

/// Applies one command. Returns whether the panel should be redrawn.
async fn execute<S: TokenStore>(
    controller: &mut Controller<S>,
    command: ShellCommand,
) -> Result<bool> {
    match command {
        ShellCommand::SubmitSignup {
            name,
            email,
            password,
        } => {
            let password = if name.is_empty() || email.is_empty() {
                password.unwrap_or_default()
            } else {
                password_or_prompt(password)?
            };
            controller
                .signup(&SignupForm {
                    name,
                    email,
                    password,
                })
                .await;
        }
        ShellCommand::SubmitLogin { email, password } => {
            let password = if email.is_empty() {
                password.unwrap_or_default()
            } else {
                password_or_prompt(password)?
            };
            controller.login(&LoginForm { email, password }).await;
        }
        ShellCommand::ShowSignup => controller.show_signup(),
        ShellCommand::ShowSignin => controller.show_signin(),
        ShellCommand::Add(title) => controller.create_todo(&TodoForm::new(title)).await,
        ShellCommand::Toggle(n) => {
            let Some(action) = row_at(controller, n).map(TodoRow::toggle) else {
                return Ok(no_such_row(n));
            };
            controller.perform(action).await;
        }
        ShellCommand::Delete(n) => {
            let Some(action) = row_at(controller, n).map(TodoRow::delete) else {
                return Ok(no_such_row(n));
            };
            if !confirm("Delete this todo?")? {
                return Ok(false);
            }
            controller.perform(action).await;
        }
        ShellCommand::Refresh => controller.refresh().await,
        ShellCommand::Logout => controller.logout(),
        ShellCommand::Help => return Ok(true),
        ShellCommand::Quit => return Ok(false),
    }
    Ok(controller.view() == ViewState::TodoList)
}

fn row_at<S: TokenStore>(controller: &Controller<S>, position: usize) -> Option<&TodoRow> {
    controller
        .rows()
        .iter()
        .filter_map(Row::as_item)
        .find(|row| row.position == position)
}

fn no_such_row(position: usize) -> bool {
    display::print_status(&Status::error(format!("No row {position}")));
    false
}

/// Reads one line; `None` at end of input.
fn read_line(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("failed to read from stdin")?;
    if read == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
}
