//! Integration tests for the view controller's state transitions.

mod support;

use std::{cell::RefCell, rc::Rc};

use axum::http::Method;
use client::{
    Controller, LoginForm, MemoryTokenStore, Row, SignupForm, Status, TodoForm, ViewState,
    render::EMPTY_LIST_PLACEHOLDER,
};
use serde_json::json;
use shared::models::TodoRecord;
use support::MockBackend;

fn login_form() -> LoginForm {
    LoginForm {
        email: "ada@example.com".into(),
        password: "hunter2".into(),
    }
}

fn two_todos() -> serde_json::Value {
    json!({"todos": [
        {"_id": "a1", "title": "Buy milk", "done": false},
        {"_id": "b2", "title": "Walk dog", "done": true}
    ]})
}

fn recorded(
    controller: Controller<MemoryTokenStore>,
) -> (Controller<MemoryTokenStore>, Rc<RefCell<Vec<Status>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let controller =
        controller.with_status_listener(move |status| sink.borrow_mut().push(status.clone()));
    (controller, seen)
}

#[tokio::test]
async fn test_bootstrap_without_session_shows_signin() {
    let backend = MockBackend::start().await;
    let mut controller = Controller::new(backend.api());

    controller.bootstrap().await;

    assert_eq!(controller.view(), ViewState::Signin);
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn test_bootstrap_with_session_fetches_list() {
    let backend = MockBackend::start().await;
    backend.respond(Method::GET, "/api/todo/", 200, two_todos());
    let mut controller = Controller::new(backend.signed_in_api("abc"));

    controller.bootstrap().await;

    assert_eq!(controller.view(), ViewState::TodoList);
    assert_eq!(controller.status(), &Status::info("Todos loaded!"));
    assert_eq!(controller.rows().len(), 2);
    assert_eq!(backend.request_count(), 1);
}

#[tokio::test]
async fn test_signup_with_empty_field_sends_nothing() {
    let backend = MockBackend::start().await;
    let mut controller = Controller::new(backend.api());
    controller.show_signup();

    controller
        .signup(&SignupForm {
            name: "Ada".into(),
            email: "  ".into(),
            password: "pw".into(),
        })
        .await;

    assert_eq!(backend.request_count(), 0);
    assert_eq!(
        controller.status(),
        &Status::error("Please fill name, email and password.")
    );
    assert_eq!(controller.view(), ViewState::Signup);
}

#[tokio::test]
async fn test_successful_signup_moves_to_signin() {
    let backend = MockBackend::start().await;
    backend.respond(Method::POST, "/api/user/signup", 201, json!({}));
    let (mut controller, seen) = recorded(Controller::new(backend.api()));
    controller.show_signup();

    controller
        .signup(&SignupForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "pw".into(),
        })
        .await;

    assert_eq!(controller.view(), ViewState::Signin);
    assert_eq!(
        controller.status(),
        &Status::info("User created. Please signin")
    );
    assert!(seen.borrow().contains(&Status::info("Signing up...")));
}

#[tokio::test]
async fn test_signup_while_signed_in_keeps_list_panel() {
    let backend = MockBackend::start().await;
    backend.respond(Method::GET, "/api/todo/", 200, two_todos());
    backend.respond(Method::POST, "/api/user/signup", 201, json!({}));
    let mut controller = Controller::new(backend.signed_in_api("abc"));
    controller.bootstrap().await;

    controller
        .signup(&SignupForm {
            name: "Bob".into(),
            email: "bob@example.com".into(),
            password: "pw".into(),
        })
        .await;

    assert!(controller.is_signed_in());
    assert_eq!(controller.view(), ViewState::TodoList);
    assert_eq!(
        controller.status(),
        &Status::info("User created. Please signin")
    );
    assert_eq!(controller.rows().len(), 2);
}

#[tokio::test]
async fn test_failed_signup_stays_on_signup() {
    let backend = MockBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/user/signup",
        409,
        json!({"message": "User already exists"}),
    );
    let mut controller = Controller::new(backend.api());
    controller.show_signup();

    controller
        .signup(&SignupForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "pw".into(),
        })
        .await;

    assert_eq!(controller.view(), ViewState::Signup);
    assert_eq!(controller.status(), &Status::error("User already exists"));
}

#[tokio::test]
async fn test_login_stores_token_and_fetches_list() {
    let backend = MockBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/user/login",
        200,
        json!({"token": "abc", "message": "ok"}),
    );
    backend.respond(Method::GET, "/api/todo/", 200, two_todos());
    let (mut controller, seen) = recorded(Controller::new(backend.api()));

    controller.login(&login_form()).await;

    assert_eq!(controller.api().session().get(), Some("abc"));
    assert_eq!(controller.view(), ViewState::TodoList);

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, Method::GET);
    assert_eq!(requests[1].path, "/api/todo/");
    assert_eq!(requests[1].token.as_deref(), Some("abc"));

    assert_eq!(
        *seen.borrow(),
        vec![
            Status::info("Signing in..."),
            Status::info("ok"),
            Status::info("Todos loaded!"),
        ]
    );
}

#[tokio::test]
async fn test_login_with_blank_token_stays_signed_out() {
    let backend = MockBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/user/login",
        200,
        json!({"token": "", "message": "ok"}),
    );
    let mut controller = Controller::new(backend.api());

    controller.login(&login_form()).await;

    assert!(!controller.is_signed_in());
    assert_eq!(controller.view(), ViewState::Signin);
    assert_eq!(controller.status(), &Status::error("Signin failed"));
    assert_eq!(backend.request_count(), 1);
}

#[tokio::test]
async fn test_failed_login_keeps_signin_panel() {
    let backend = MockBackend::start().await;
    backend.respond(Method::POST, "/api/user/login", 400, json!({}));
    let mut controller = Controller::new(backend.api());

    controller.login(&login_form()).await;

    assert_eq!(controller.view(), ViewState::Signin);
    assert_eq!(controller.status(), &Status::error("Signin failed"));
    assert!(!controller.is_signed_in());
}

#[tokio::test]
async fn test_create_while_signed_out_sends_nothing() {
    let backend = MockBackend::start().await;
    let mut controller = Controller::new(backend.api());

    controller.create_todo(&TodoForm::new("Buy milk")).await;

    assert_eq!(backend.request_count(), 0);
    assert_eq!(
        controller.status(),
        &Status::error("You must be signed in to create a todo")
    );
}

#[tokio::test]
async fn test_create_with_blank_title_is_rejected_locally() {
    let backend = MockBackend::start().await;
    let mut controller = Controller::new(backend.signed_in_api("abc"));

    controller.create_todo(&TodoForm::new("   ")).await;

    assert_eq!(backend.request_count(), 0);
    assert_eq!(
        controller.status(),
        &Status::error("Please enter a todo title")
    );
}

#[tokio::test]
async fn test_create_refetches_and_keeps_create_message() {
    let backend = MockBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/todo/create",
        201,
        json!({"message": "Todo created"}),
    );
    backend.respond(Method::GET, "/api/todo/", 200, two_todos());
    let mut controller = Controller::new(backend.signed_in_api("abc"));
    controller.bootstrap().await;

    controller.create_todo(&TodoForm::new(" Buy milk ")).await;

    let requests = backend.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].body, Some(json!({"title": "Buy milk", "description": ""})));
    assert_eq!(requests[2].method, Method::GET);
    assert_eq!(controller.status(), &Status::info("Todo created"));
}

#[tokio::test]
async fn test_toggle_row_sends_inverted_done_then_refetches() {
    let backend = MockBackend::start().await;
    backend.respond(Method::GET, "/api/todo/", 200, two_todos());
    backend.respond(Method::PUT, "/api/todo/UpdateTodo", 200, json!({}));
    let mut controller = Controller::new(backend.signed_in_api("abc"));
    controller.bootstrap().await;

    let action = controller.rows()[1].as_item().unwrap().toggle();
    controller.perform(action).await;

    let requests = backend.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].method, Method::PUT);
    assert_eq!(
        requests[1].body,
        Some(json!({"_id": "b2", "title": "Walk dog", "description": "", "done": false}))
    );
    assert_eq!(requests[2].method, Method::GET);
    assert_eq!(controller.status(), &Status::info("Todo updated"));
}

#[tokio::test]
async fn test_failed_delete_still_refetches() {
    let backend = MockBackend::start().await;
    backend.respond(Method::GET, "/api/todo/", 200, two_todos());
    backend.respond(
        Method::DELETE,
        "/api/todo/a1",
        500,
        json!({"message": "boom"}),
    );
    let mut controller = Controller::new(backend.signed_in_api("abc"));
    controller.bootstrap().await;

    controller.delete_todo("a1").await;

    let requests = backend.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].path, "/api/todo/a1");
    assert_eq!(requests[2].method, Method::GET);
    assert_eq!(controller.status(), &Status::error("boom"));
    assert_eq!(controller.rows().len(), 2);
}

#[tokio::test]
async fn test_revoked_session_returns_to_signin() {
    let backend = MockBackend::start().await;
    backend.respond(
        Method::GET,
        "/api/todo/",
        403,
        json!({"message": "Invalid token"}),
    );
    let mut controller = Controller::new(backend.signed_in_api("stale"));

    controller.bootstrap().await;

    assert!(!controller.is_signed_in());
    assert_eq!(controller.view(), ViewState::Signin);
    assert_eq!(controller.status(), &Status::error("Invalid token"));
    assert!(controller.rows().is_empty());
}

#[tokio::test]
async fn test_revoked_during_toggle_skips_refetch() {
    let backend = MockBackend::start().await;
    backend.respond(Method::GET, "/api/todo/", 200, two_todos());
    backend.respond(Method::PUT, "/api/todo/UpdateTodo", 401, json!({}));
    let mut controller = Controller::new(backend.signed_in_api("abc"));
    controller.bootstrap().await;

    controller
        .toggle_todo(&TodoRecord::new("a1", "Buy milk", false))
        .await;

    assert_eq!(backend.request_count(), 2);
    assert_eq!(controller.view(), ViewState::Signin);
    assert_eq!(controller.status(), &Status::error("Failed to update todo"));
}

#[tokio::test]
async fn test_empty_list_renders_placeholder() {
    let backend = MockBackend::start().await;
    backend.respond(Method::GET, "/api/todo/", 200, json!({"todos": []}));
    let mut controller = Controller::new(backend.signed_in_api("abc"));

    controller.bootstrap().await;

    assert_eq!(
        controller.rows(),
        &[Row::Placeholder(EMPTY_LIST_PLACEHOLDER)]
    );
    assert!(controller.todos().is_empty());
}

#[tokio::test]
async fn test_logout_clears_session_and_shows_signin() {
    let backend = MockBackend::start().await;
    backend.respond(Method::GET, "/api/todo/", 200, two_todos());
    let mut controller = Controller::new(backend.signed_in_api("abc"));
    controller.bootstrap().await;

    controller.logout();

    assert!(!controller.is_signed_in());
    assert_eq!(controller.view(), ViewState::Signin);
    assert_eq!(controller.status(), &Status::info("You are logged out"));
    assert!(controller.rows().is_empty());
}

#[tokio::test]
async fn test_panel_links_only_apply_when_signed_out() {
    let backend = MockBackend::start().await;
    backend.respond(Method::GET, "/api/todo/", 200, two_todos());

    let mut signed_out = Controller::new(backend.api());
    signed_out.bootstrap().await;
    signed_out.show_signup();
    assert_eq!(signed_out.view(), ViewState::Signup);
    signed_out.show_signin();
    assert_eq!(signed_out.view(), ViewState::Signin);
    assert_eq!(signed_out.status(), &Status::empty());

    let mut signed_in = Controller::new(backend.signed_in_api("abc"));
    signed_in.bootstrap().await;
    signed_in.show_signup();
    assert_eq!(signed_in.view(), ViewState::TodoList);
}

#[tokio::test]
async fn test_record_lookup_uses_last_fetch() {
    let backend = MockBackend::start().await;
    backend.respond(Method::GET, "/api/todo/", 200, two_todos());
    let mut controller = Controller::new(backend.signed_in_api("abc"));
    controller.bootstrap().await;

    assert_eq!(
        controller.record("b2"),
        Some(&TodoRecord::new("b2", "Walk dog", true))
    );
    assert_eq!(controller.record("zz"), None);
}
