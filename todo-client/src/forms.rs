//! Input validation for the three forms.
//!
//! Text fields are trimmed; passwords are taken verbatim. A form that fails
//! validation never produces a request body.

use shared::models::{CreateTodoRequest, LoginRequest, SignupRequest};
use thiserror::Error;

/// A required form field was left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Signup needs name, email and password.
    #[error("Please fill name, email and password.")]
    IncompleteSignup,

    /// Login needs email and password.
    #[error("Please enter email and password")]
    IncompleteLogin,

    /// A todo needs a title.
    #[error("Please enter a todo title")]
    MissingTitle,
}

/// Raw contents of the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl SignupForm {
    /// Produces the signup body.
    ///
    /// # Errors
    /// [`ValidationError::IncompleteSignup`] when any field is empty.
    pub fn validate(&self) -> Result<SignupRequest, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::IncompleteSignup);
        }
        Ok(SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Raw contents of the sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginForm {
    /// Produces the login body.
    ///
    /// # Errors
    /// [`ValidationError::IncompleteLogin`] when either field is empty.
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::IncompleteLogin);
        }
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Raw contents of the todo creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    /// Task text.
    pub title: String,
}

impl TodoForm {
    /// Wraps a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Produces the create body.
    ///
    /// # Errors
    /// [`ValidationError::MissingTitle`] when the trimmed title is empty.
    pub fn validate(&self) -> Result<CreateTodoRequest, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        Ok(CreateTodoRequest::new(title))
    }
}
