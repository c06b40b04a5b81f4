//! HTTP client for the todo backend.
//!
//! Every operation follows the same shape: build a JSON request (with the
//! session token in the `token` header when the endpoint needs it), await the
//! response, parse the body and classify the status. Failures come back as
//! [`ApiError`] values carrying the text to show the user; nothing here
//! panics or retries.

use std::fmt;

use reqwest::{
    Client, Method, RequestBuilder, StatusCode,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::de::DeserializeOwned;
use shared::models::{
    CreateTodoRequest, LoginRequest, LoginResponse, MessageResponse, SignupRequest,
    TodoListResponse, TodoRecord, UpdateTodoRequest,
};
use thiserror::Error;
use tracing::{debug, error, warn};
use url::Url;

use crate::session::{Session, SessionError, TokenStore};

/// Header carrying the session token on authenticated requests.
pub const TOKEN_HEADER: &str = "token";

/// The six backend operations, each with its own user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `POST /user/signup`
    Signup,
    /// `POST /user/login`
    Login,
    /// `GET /todo/`
    ListTodos,
    /// `POST /todo/create`
    CreateTodo,
    /// `PUT /todo/UpdateTodo`
    UpdateTodo,
    /// `DELETE /todo/{id}`
    DeleteTodo,
}

impl Operation {
    /// Whether the endpoint needs a session token.
    #[must_use]
    pub fn requires_session(self) -> bool {
        !matches!(self, Self::Signup | Self::Login)
    }

    /// Status text shown while the request is in flight, if any.
    #[must_use]
    pub fn progress_message(self) -> Option<&'static str> {
        match self {
            Self::Signup => Some("Signing up..."),
            Self::Login => Some("Signing in..."),
            _ => None,
        }
    }

    /// Shown on success when the backend sends no message.
    #[must_use]
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Signup => "User created. Please signin",
            Self::Login => "Login successful!",
            Self::ListTodos => "Todos loaded!",
            Self::CreateTodo => "Todo created!",
            Self::UpdateTodo => "Todo updated",
            Self::DeleteTodo => "Todo deleted",
        }
    }

    /// Shown on a non-2xx status when the backend sends no message.
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Signup => "Signup failed",
            Self::Login => "Signin failed",
            Self::ListTodos => "Failed to fetch todos",
            Self::CreateTodo => "Failed to create todo",
            Self::UpdateTodo => "Failed to update todo",
            Self::DeleteTodo => "Failed to delete todo",
        }
    }

    /// Shown when the request never produced a usable response.
    #[must_use]
    pub fn transport_message(self) -> &'static str {
        match self {
            Self::Signup => "Network/server error during signup",
            Self::Login => "Network/server error during signin",
            Self::ListTodos => "Error fetching todos",
            Self::CreateTodo => "Network/server error when creating todo",
            Self::UpdateTodo => "Network error when updating todo",
            Self::DeleteTodo => "Network error when deleting todo",
        }
    }

    /// Shown when an authenticated operation is attempted without a token.
    #[must_use]
    pub fn signed_out_message(self) -> &'static str {
        match self {
            Self::ListTodos => "Please sign in to see your todos.",
            Self::CreateTodo => "You must be signed in to create a todo",
            Self::Signup | Self::Login | Self::UpdateTodo | Self::DeleteTodo => "Not signed in",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::ListTodos => "list todos",
            Self::CreateTodo => "create todo",
            Self::UpdateTodo => "update todo",
            Self::DeleteTodo => "delete todo",
        })
    }
}

/// Why an operation did not succeed. `Display` yields the status-line text.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session token; the request was not sent.
    #[error("{}", .0.signed_out_message())]
    SignedOut(Operation),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Rejected {
        /// Operation that was rejected.
        operation: Operation,
        /// HTTP status of the response.
        status: StatusCode,
        /// Backend message, or the operation's default failure text.
        message: String,
    },

    /// The request failed in transit or the body was not the expected JSON.
    #[error("{}", .operation.transport_message())]
    Transport {
        /// Operation that failed.
        operation: Operation,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// A successful sign-in answer carried no usable token.
    #[error("Signin failed")]
    MissingToken,

    /// The session token could not be persisted.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// True when the failure was decided locally, without a network round trip.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::SignedOut(_) | Self::Session(_))
    }

    /// True for 401/403 answers to authenticated calls, which revoke the
    /// stored session.
    #[must_use]
    pub fn is_session_revoked(&self) -> bool {
        matches!(
            self,
            Self::Rejected { operation, status, .. }
                if operation.requires_session() && revokes_session(*status)
        )
    }
}

/// Errors raised while constructing a [`TodoApi`].
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The base URL cannot carry path segments.
    #[error("base URL `{0}` cannot carry API paths")]
    InvalidBaseUrl(Url),

    /// The HTTP client could not be created.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for the todo REST API, owning the active [`Session`].
#[derive(Debug)]
pub struct TodoApi<S> {
    base_url: Url,
    http: Client,
    session: Session<S>,
}

impl<S: TokenStore> TodoApi<S> {
    /// Creates a client rooted at `base_url`, e.g. `https://host/api`.
    ///
    /// # Errors
    /// Returns a [`ClientBuildError`] if the URL cannot be a base or the
    /// HTTP client fails to initialize.
    pub fn new(base_url: Url, session: Session<S>) -> Result<Self, ClientBuildError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientBuildError::InvalidBaseUrl(base_url));
        }
        let http = Client::builder()
            .user_agent(concat!("todo-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url,
            http,
            session,
        })
    }

    /// The active session.
    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Whether a session token is present.
    pub fn is_signed_in(&self) -> bool {
        self.session.is_active()
    }

    /// Drops the session token. No request is sent.
    pub fn logout(&mut self) {
        self.session.clear();
    }

    /// Registers a new account and returns the backend's message.
    ///
    /// # Errors
    /// [`ApiError::Rejected`] or [`ApiError::Transport`].
    pub async fn signup(&mut self, request: &SignupRequest) -> Result<String, ApiError> {
        let op = Operation::Signup;
        let builder = self.request(Method::POST, &["user", "signup"]).json(request);
        let body: MessageResponse = self.execute(op, builder).await?;
        Ok(body.message_or(op.success_message()))
    }

    /// Signs in, stores the returned token, and returns the backend's message.
    ///
    /// # Errors
    /// [`ApiError::Rejected`], [`ApiError::Transport`],
    /// [`ApiError::MissingToken`] when the answer has a blank token, or
    /// [`ApiError::Session`] when the token cannot be stored.
    pub async fn login(&mut self, request: &LoginRequest) -> Result<String, ApiError> {
        let op = Operation::Login;
        let builder = self.request(Method::POST, &["user", "login"]).json(request);
        let body: LoginResponse = self.execute(op, builder).await?;
        if body.token.trim().is_empty() {
            error!(operation = %op, "login response carried no token");
            return Err(ApiError::MissingToken);
        }
        self.session.set(body.token.clone())?;
        Ok(body.message_or(op.success_message()))
    }

    /// Fetches the signed-in user's todos in backend order.
    ///
    /// # Errors
    /// [`ApiError::SignedOut`] without a token (no request is sent), otherwise
    /// [`ApiError::Rejected`] or [`ApiError::Transport`].
    pub async fn list_todos(&mut self) -> Result<Vec<TodoRecord>, ApiError> {
        let op = Operation::ListTodos;
        let builder = self.authorized(op, Method::GET, &["todo", ""])?;
        let body: TodoListResponse = self.execute(op, builder).await?;
        Ok(body.into_todos())
    }

    /// Creates a todo and returns the backend's message.
    ///
    /// # Errors
    /// See [`TodoApi::list_todos`].
    pub async fn create_todo(&mut self, request: &CreateTodoRequest) -> Result<String, ApiError> {
        let op = Operation::CreateTodo;
        let builder = self
            .authorized(op, Method::POST, &["todo", "create"])?
            .json(request);
        self.execute_message(op, builder).await
    }

    /// Replaces a todo's title and done flag and returns the backend's message.
    ///
    /// # Errors
    /// See [`TodoApi::list_todos`].
    pub async fn update_todo(&mut self, request: &UpdateTodoRequest) -> Result<String, ApiError> {
        let op = Operation::UpdateTodo;
        let builder = self
            .authorized(op, Method::PUT, &["todo", "UpdateTodo"])?
            .json(request);
        self.execute_message(op, builder).await
    }

    /// Deletes the todo `id` and returns the backend's message.
    ///
    /// # Errors
    /// See [`TodoApi::list_todos`].
    pub async fn delete_todo(&mut self, id: &str) -> Result<String, ApiError> {
        let op = Operation::DeleteTodo;
        let builder = self.authorized(op, Method::DELETE, &["todo", id])?;
        self.execute_message(op, builder).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(method = %method, url = %url, "sending request");
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    fn authorized(
        &self,
        op: Operation,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ApiError> {
        let Some(token) = self.session.get() else {
            debug!(operation = %op, "no session token; request not sent");
            return Err(ApiError::SignedOut(op));
        };
        Ok(self.request(method, segments).header(TOKEN_HEADER, token))
    }

    async fn execute_message(
        &mut self,
        op: Operation,
        builder: RequestBuilder,
    ) -> Result<String, ApiError> {
        let body: MessageResponse = self.execute(op, builder).await?;
        Ok(body.message_or(op.success_message()))
    }

    async fn execute<T: DeserializeOwned>(
        &mut self,
        op: Operation,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let transport = |source: reqwest::Error| {
            error!(operation = %op, error = %source, "request failed");
            ApiError::Transport {
                operation: op,
                source,
            }
        };

        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(transport);
        }

        // Error bodies are best effort: anything unparsable falls back to the default text.
        let body = response
            .bytes()
            .await
            .ok()
            .and_then(|bytes| serde_json::from_slice::<MessageResponse>(&bytes).ok())
            .unwrap_or_default();

        if op.requires_session() && revokes_session(status) {
            warn!(operation = %op, status = %status, "session rejected by backend; clearing token");
            self.session.clear();
        }
        if !op.requires_session() {
            error!(operation = %op, status = %status, body = ?body.message, "{op} error");
        }

        Err(ApiError::Rejected {
            operation: op,
            status,
            message: body.message_or(op.failure_message()),
        })
    }
}

fn revokes_session(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}
