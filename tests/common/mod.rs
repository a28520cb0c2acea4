// Shared stub backend for integration tests: serves the three dashboard API
// endpoints and records every request it sees.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::{Arc, Mutex};

pub struct StubState {
    /// Request log, e.g. "GET /api/containers".
    pub requests: Mutex<Vec<String>>,
    /// When set, the status endpoint answers 500.
    pub status_fail: AtomicBool,
    /// HTTP status for the containers endpoint.
    pub containers_status: AtomicU16,
    /// Raw JSON body for the containers endpoint.
    pub containers_body: Mutex<Value>,
    /// HTTP status + body for action endpoints.
    pub action_response: Mutex<(u16, Value)>,
}

pub struct StubBackend {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl StubBackend {
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn count_requests(&self, line: &str) -> usize {
        self.requests().iter().filter(|r| r == &line).count()
    }
}

pub async fn spawn_stub_backend() -> StubBackend {
    let state = Arc::new(StubState {
        requests: Mutex::new(Vec::new()),
        status_fail: AtomicBool::new(false),
        containers_status: AtomicU16::new(200),
        containers_body: Mutex::new(json!([])),
        action_response: Mutex::new((200, json!({ "message": "ok" }))),
    });

    let router = Router::new()
        .route("/api/system/status", get(system_status))
        .route("/api/containers", get(list_containers))
        .route("/api/containers/{id}/{action}", post(container_action))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    StubBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

pub fn sample_status_json() -> Value {
    json!({
        "cpu_percent": 12.5,
        "ram_percent": 50.0,
        "ram_used_gb": 8.0,
        "ram_total_gb": 16.0,
        "disk_percent": 40.0,
        "disk_used_gb": 100.0,
        "disk_total_gb": 250.0,
        "platform": "Linux 6.1.0",
        "architecture": "x86_64"
    })
}

/// Polls until `predicate` holds or the deadline passes.
pub async fn wait_until<F: Fn() -> bool>(predicate: F, timeout_ms: u64) -> bool {
    let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_millis(timeout_ms);
    loop {
        if predicate() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }
}

async fn system_status(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    state
        .requests
        .lock()
        .unwrap()
        .push("GET /api/system/status".into());
    if state.status_fail.load(Ordering::Relaxed) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "metrics unavailable" })),
        );
    }
    (StatusCode::OK, Json(sample_status_json()))
}

async fn list_containers(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    state
        .requests
        .lock()
        .unwrap()
        .push("GET /api/containers".into());
    let status = StatusCode::from_u16(state.containers_status.load(Ordering::Relaxed)).unwrap();
    let body = state.containers_body.lock().unwrap().clone();
    (status, Json(body))
}

async fn container_action(
    State(state): State<Arc<StubState>>,
    Path((id, action)): Path<(String, String)>,
) -> impl IntoResponse {
    state
        .requests
        .lock()
        .unwrap()
        .push(format!("POST /api/containers/{id}/{action}"));
    let (status, body) = state.action_response.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), Json(body))
}
