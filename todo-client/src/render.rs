//! Projection of todo records into list rows.

use shared::models::{TodoRecord, UpdateTodoRequest};

/// Text of the single row shown for an empty list.
pub const EMPTY_LIST_PLACEHOLDER: &str = "No todos yet, add your first task";

/// Label used for records whose title is empty.
pub const UNTITLED_LABEL: &str = "(no title)";

/// An action bound to one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoAction {
    /// Flip the record's done flag, resending its title unchanged.
    Toggle(TodoRecord),
    /// Remove the record.
    Delete {
        /// Backend identifier of the record.
        id: String,
    },
}

impl TodoAction {
    /// Identifier of the record the action targets.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Toggle(record) => &record.id,
            Self::Delete { id } => id,
        }
    }

    /// The update body a toggle sends, `None` for deletes.
    #[must_use]
    pub fn update_request(&self) -> Option<UpdateTodoRequest> {
        match self {
            Self::Toggle(record) => Some(UpdateTodoRequest::toggled(record)),
            Self::Delete { .. } => None,
        }
    }
}

/// One rendered todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    /// 1-based position in the list.
    pub position: usize,
    /// Displayed title.
    pub label: String,
    /// Whether the item is struck through.
    pub done: bool,
    /// The record this row was rendered from.
    pub record: TodoRecord,
}

impl TodoRow {
    /// Caption of the toggle control.
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.done { "Mark undone" } else { "Mark done" }
    }

    /// The toggle-done action.
    #[must_use]
    pub fn toggle(&self) -> TodoAction {
        TodoAction::Toggle(self.record.clone())
    }

    /// The delete action.
    #[must_use]
    pub fn delete(&self) -> TodoAction {
        TodoAction::Delete {
            id: self.record.id.clone(),
        }
    }
}

/// A row of the todo list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Shown alone when there are no todos.
    Placeholder(&'static str),
    /// A todo with its actions.
    Item(TodoRow),
}

impl Row {
    /// The todo row, if this is not the placeholder.
    #[must_use]
    pub fn as_item(&self) -> Option<&TodoRow> {
        match self {
            Self::Item(row) => Some(row),
            Self::Placeholder(_) => None,
        }
    }
}

/// Renders `todos` in input order; an empty slice yields one placeholder row.
#[must_use]
pub fn render_todos(todos: &[TodoRecord]) -> Vec<Row> {
    if todos.is_empty() {
        return vec![Row::Placeholder(EMPTY_LIST_PLACEHOLDER)];
    }

    todos
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let label = if record.title.is_empty() {
                UNTITLED_LABEL.to_string()
            } else {
                record.title.clone()
            };
            Row::Item(TodoRow {
                position: index + 1,
                label,
                done: record.done,
                record: record.clone(),
            })
        })
        .collect()
}
