//! UI-agnostic view model.
//!
//! [`Controller`] owns the API client and exposes the user's intents
//! (sign up, log in, create, toggle, delete, ...). Any front end renders
//! [`Controller::view`], [`Controller::status`] and [`Controller::rows`]
//! after each intent completes.

use std::fmt;

use shared::models::{TodoRecord, UpdateTodoRequest};
use tracing::info;

use crate::{
    api::{ApiError, Operation, TodoApi},
    forms::{LoginForm, SignupForm, TodoForm},
    render::{Row, TodoAction, render_todos},
    session::TokenStore,
};

/// The panel currently shown. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Account creation form.
    Signup,
    /// Sign-in form.
    Signin,
    /// The signed-in user's list.
    TodoList,
}

/// Tone of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Progress or success.
    Info,
    /// Validation or remote failure.
    Error,
}

/// The single-line status display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Text to show; empty clears the line.
    pub text: String,
    /// How to style it.
    pub kind: StatusKind,
}

impl Status {
    /// An informational status.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    /// An error status.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    /// The cleared status line.
    #[must_use]
    pub fn empty() -> Self {
        Self::info("")
    }

    /// Whether this is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

type StatusListener = Box<dyn FnMut(&Status)>;

/// View model binding the session, API client and list renderer.
pub struct Controller<S> {
    api: TodoApi<S>,
    view: ViewState,
    status: Status,
    todos: Vec<TodoRecord>,
    rows: Vec<Row>,
    listener: Option<StatusListener>,
}

impl<S: TokenStore> Controller<S> {
    /// Wraps `api`. The view starts on the sign-in panel until [`Controller::bootstrap`].
    pub fn new(api: TodoApi<S>) -> Self {
        Self {
            api,
            view: ViewState::Signin,
            status: Status::empty(),
            todos: Vec::new(),
            rows: Vec::new(),
            listener: None,
        }
    }

    /// Calls `listener` on every status change, including in-progress text
    /// set before a request is awaited.
    #[must_use]
    pub fn with_status_listener(mut self, listener: impl FnMut(&Status) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Current panel.
    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Current status line.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Rows of the most recent successful fetch.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Records of the most recent successful fetch.
    pub fn todos(&self) -> &[TodoRecord] {
        &self.todos
    }

    /// Whether a session token is present.
    pub fn is_signed_in(&self) -> bool {
        self.api.is_signed_in()
    }

    /// The underlying API client.
    pub fn api(&self) -> &TodoApi<S> {
        &self.api
    }

    /// Picks the initial panel from the stored session, fetching the list
    /// when signed in.
    pub async fn bootstrap(&mut self) {
        if self.api.is_signed_in() {
            self.view = ViewState::TodoList;
            self.refresh().await;
        } else {
            self.view = ViewState::Signin;
        }
    }

    /// Navigates to the signup panel. Ignored while signed in.
    pub fn show_signup(&mut self) {
        self.navigate(ViewState::Signup);
    }

    /// Navigates to the sign-in panel. Ignored while signed in.
    pub fn show_signin(&mut self) {
        self.navigate(ViewState::Signin);
    }

    /// Submits the signup form; on success the sign-in panel is shown unless
    /// a session is already active.
    pub async fn signup(&mut self, form: &SignupForm) {
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => return self.set_status(Status::error(err.to_string())),
        };

        self.announce_progress(Operation::Signup);
        match self.api.signup(&request).await {
            Ok(message) => {
                // The auth panels are only reachable while signed out.
                if !self.api.is_signed_in() {
                    self.view = ViewState::Signin;
                }
                self.set_status(Status::info(message));
            }
            Err(err) => self.report(&err),
        }
    }

    /// Submits the sign-in form; on success the list panel is shown and fetched.
    pub async fn login(&mut self, form: &LoginForm) {
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => return self.set_status(Status::error(err.to_string())),
        };

        self.announce_progress(Operation::Login);
        match self.api.login(&request).await {
            Ok(message) => {
                info!(email = %request.email, "signed in");
                self.set_status(Status::info(message));
                self.view = ViewState::TodoList;
                self.refresh().await;
            }
            Err(err) => self.report(&err),
        }
    }

    /// Clears the session and returns to the sign-in panel.
    pub fn logout(&mut self) {
        self.api.logout();
        self.view = ViewState::Signin;
        self.todos.clear();
        self.rows.clear();
        self.set_status(Status::info("You are logged out"));
    }

    /// Fetches and re-renders the list, reporting "Todos loaded!" on success.
    pub async fn refresh(&mut self) {
        if self.reload().await {
            self.set_status(Status::info(Operation::ListTodos.success_message()));
        }
    }

    /// Fetches and re-renders the list without announcing success; failures
    /// are reported. Returns whether the fetch succeeded.
    pub async fn reload(&mut self) -> bool {
        match self.api.list_todos().await {
            Ok(todos) => {
                self.rows = render_todos(&todos);
                self.todos = todos;
                true
            }
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    /// Submits the todo form, then re-fetches the list.
    pub async fn create_todo(&mut self, form: &TodoForm) {
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => return self.set_status(Status::error(err.to_string())),
        };
        let result = self.api.create_todo(&request).await;
        self.finish_mutation(result).await;
    }

    /// Flips `record.done`, then re-fetches the list.
    pub async fn toggle_todo(&mut self, record: &TodoRecord) {
        self.perform(TodoAction::Toggle(record.clone())).await;
    }

    /// Deletes the todo `id`, then re-fetches the list.
    pub async fn delete_todo(&mut self, id: &str) {
        self.perform(TodoAction::Delete { id: id.to_string() }).await;
    }

    /// Runs a row action, then re-fetches the list.
    pub async fn perform(&mut self, action: TodoAction) {
        let result = match action {
            TodoAction::Toggle(record) => {
                let request = UpdateTodoRequest::toggled(&record);
                self.api.update_todo(&request).await
            }
            TodoAction::Delete { id } => self.api.delete_todo(&id).await,
        };
        self.finish_mutation(result).await;
    }

    /// The record with backend id `id` from the last fetch.
    pub fn record(&self, id: &str) -> Option<&TodoRecord> {
        self.todos.iter().find(|record| record.id == id)
    }

    async fn finish_mutation(&mut self, result: Result<String, ApiError>) {
        let remote = match result {
            Ok(message) => {
                self.set_status(Status::info(message));
                true
            }
            Err(err) => {
                let remote = !err.is_local();
                self.report(&err);
                remote
            }
        };

        // Any completed round trip re-renders from the backend's copy.
        if remote && self.api.is_signed_in() {
            self.reload().await;
        }
    }

    fn navigate(&mut self, target: ViewState) {
        if self.view == ViewState::TodoList || self.api.is_signed_in() {
            return;
        }
        self.view = target;
        self.set_status(Status::empty());
    }

    fn announce_progress(&mut self, operation: Operation) {
        if let Some(text) = operation.progress_message() {
            self.set_status(Status::info(text));
        }
    }

    fn report(&mut self, err: &ApiError) {
        self.set_status(Status::error(err.to_string()));
        self.sync_view_with_session();
    }

    fn sync_view_with_session(&mut self) {
        if self.view == ViewState::TodoList && !self.api.is_signed_in() {
            self.view = ViewState::Signin;
            self.todos.clear();
            self.rows.clear();
        }
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.status);
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Controller<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("api", &self.api)
            .field("view", &self.view)
            .field("status", &self.status)
            .field("rows", &self.rows.len())
            .finish_non_exhaustive()
    }
}
