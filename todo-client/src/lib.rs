#![cfg_attr(not(test), forbid(unsafe_code))]

//! Client side of the todo service: session persistence, the REST API
//! client, form validation, list rendering and the view controller that
//! front ends bind to.

pub mod api;
pub mod controller;
pub mod forms;
pub mod render;
pub mod session;

pub use api::{ApiError, ClientBuildError, Operation, TodoApi};
pub use controller::{Controller, Status, StatusKind, ViewState};
pub use forms::{LoginForm, SignupForm, TodoForm, ValidationError};
pub use render::{Row, TodoAction, TodoRow, render_todos};
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionError, TokenStore};
