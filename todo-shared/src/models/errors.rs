use serde::{Deserialize, Serialize};

/// The `{ message }` body returned by every endpoint, on success and on failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct MessageResponse {
    /// Human readable message, omitted by some backend responses.
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    /// Creates a response carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Returns the backend message, or `default` when it is absent or empty.
    #[must_use]
    pub fn message_or(&self, default: &str) -> String {
        non_empty(self.message.as_deref()).unwrap_or(default).to_string()
    }
}

impl std::fmt::Display for MessageResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_deref().unwrap_or_default())
    }
}

/// Treats an empty string the same as a missing one.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}
