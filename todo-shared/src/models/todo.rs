use serde::{Deserialize, Deserializer, Serialize};

/// A todo item as returned by `GET /todo/`.
///
/// The backend identifies records with a Mongo-style `_id`; `title` and
/// `done` may be missing or `null` on older records and fall back to their
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoRecord {
    /// Opaque backend identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// The task text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Completion flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub done: bool,
}

impl TodoRecord {
    /// Builds a record, mostly useful for tests and embedding UIs.
    pub fn new(id: impl Into<String>, title: impl Into<String>, done: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            done,
        }
    }
}

/// Body of a successful `GET /todo/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoListResponse {
    /// The user's todos in backend order; a missing list means none.
    #[serde(default)]
    pub todos: Option<Vec<TodoRecord>>,
}

impl TodoListResponse {
    /// Consumes the response, yielding the records in backend order.
    #[must_use]
    pub fn into_todos(self) -> Vec<TodoRecord> {
        self.todos.unwrap_or_default()
    }
}

/// Body of `POST /todo/create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodoRequest {
    /// The task text.
    pub title: String,

    /// Always empty; the backend requires the field.
    pub description: String,
}

impl CreateTodoRequest {
    /// Creates a request with an empty description.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
        }
    }
}

/// Body of `PUT /todo/UpdateTodo`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodoRequest {
    /// Identifier of the record being updated.
    #[serde(rename = "_id")]
    pub id: String,

    /// The task text, resent unchanged.
    pub title: String,

    /// Always empty; the backend requires the field.
    pub description: String,

    /// New completion flag.
    pub done: bool,
}

impl UpdateTodoRequest {
    /// Builds the update that flips `record.done`, keeping id and title.
    #[must_use]
    pub fn toggled(record: &TodoRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            description: String::new(),
            done: !record.done,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
