//! Request and response bodies exchanged with the todo backend.

pub mod errors;
pub mod todo;
pub mod user;

pub use errors::MessageResponse;
pub use todo::{CreateTodoRequest, TodoListResponse, TodoRecord, UpdateTodoRequest};
pub use user::{LoginRequest, LoginResponse, SignupRequest};
