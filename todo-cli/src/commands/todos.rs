use anyhow::Result;
use client::{Controller, Status, TodoForm, TokenStore};

use super::session::prompt;
use crate::display;

pub async fn list<S: TokenStore>(controller: &mut Controller<S>) -> bool {
    controller.refresh().await;
    finish(controller)
}

pub async fn add<S: TokenStore>(controller: &mut Controller<S>, title: &str) -> bool {
    controller.create_todo(&TodoForm::new(title)).await;
    finish(controller)
}

/// Looks the record up in a fresh fetch so the update resends its current title.
pub async fn toggle<S: TokenStore>(controller: &mut Controller<S>, id: &str) -> bool {
    if !controller.reload().await {
        return false;
    }
    let Some(record) = controller.record(id).cloned() else {
        display::print_status(&Status::error(format!("No todo with id {id}")));
        return false;
    };
    controller.toggle_todo(&record).await;
    finish(controller)
}

pub async fn delete<S: TokenStore>(
    controller: &mut Controller<S>,
    id: &str,
    skip_confirmation: bool,
) -> Result<bool> {
    if !skip_confirmation && !confirm("Delete this todo?")? {
        return Ok(true);
    }
    controller.delete_todo(id).await;
    Ok(finish(controller))
}

/// Asks a yes/no question on stdin; anything but `y`/`yes` declines.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{question} [y/N] "))?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn finish<S: TokenStore>(controller: &Controller<S>) -> bool {
    if !controller.rows().is_empty() {
        display::print_rows(controller.rows());
    }
    !controller.status().is_error()
}
