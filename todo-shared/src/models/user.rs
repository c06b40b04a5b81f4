use serde::{Deserialize, Serialize};

use super::errors::non_empty;

/// Body of `POST /user/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    /// Display name of the new account.
    pub name: String,

    /// The account's email address.
    pub email: String,

    /// The account's password, sent verbatim.
    pub password: String,
}

/// Body of `POST /user/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// The account's email address.
    pub email: String,

    /// The account's password, sent verbatim.
    pub password: String,
}

/// Successful answer to `POST /user/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Session token to send in the `token` header of authenticated calls.
    pub token: String,

    /// Optional greeting from the backend.
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Returns the backend message, or `default` when it is absent or empty.
    #[must_use]
    pub fn message_or(&self, default: &str) -> String {
        non_empty(self.message.as_deref()).unwrap_or(default).to_string()
    }
}
