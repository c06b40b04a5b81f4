//! In-process stand-in for the todo backend.
//!
//! Routes answer with scripted `(status, body)` pairs and every request is
//! recorded, so tests can assert both what was sent and that nothing was.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use client::{MemoryTokenStore, Session, TodoApi};
use serde_json::Value;
use tokio::net::TcpListener;
use url::Url;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    responses: Mutex<HashMap<(Method, String), (StatusCode, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockBackend {
    state: Arc<MockState>,
    addr: SocketAddr,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { state, addr }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/api", self.addr)).unwrap()
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.state.responses.lock().unwrap().insert(
            (method, path.to_string()),
            (StatusCode::from_u16(status).unwrap(), body.to_string()),
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    pub fn api(&self) -> TodoApi<MemoryTokenStore> {
        self.api_with(MemoryTokenStore::default())
    }

    pub fn signed_in_api(&self, token: &str) -> TodoApi<MemoryTokenStore> {
        self.api_with(MemoryTokenStore::with_token(token))
    }

    fn api_with(&self, store: MemoryTokenStore) -> TodoApi<MemoryTokenStore> {
        TodoApi::new(self.base_url(), Session::init(store).unwrap()).unwrap()
    }
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/api")).unwrap()
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let path = uri.path().to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        token: header_text("token"),
        content_type: header_text("content-type"),
        body: serde_json::from_slice(&body).ok(),
    });

    let (status, body) = state
        .responses
        .lock()
        .unwrap()
        .get(&(method, path))
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, r#"{"message":"no route"}"#.to_string()));

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}
