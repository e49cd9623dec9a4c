//! Minimal change-monitor backend for exercising commands end to end.

#![allow(dead_code)]

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use kubemon_cli::config::Config;
use kubemon_cli::output::OutputManager;
use kubemon_cli::CommandContext;
use kubemon_client::models::{ChangeEvent, ChangeId, MarkReadRequest};

#[derive(Debug, Default)]
pub struct Backend {
    pub changes: Vec<ChangeEvent>,
    pub save_error: Option<String>,
    pub saves: usize,
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct MockMonitor {
    pub addr: SocketAddr,
    pub state: Shared,
    handle: JoinHandle<()>,
}

impl MockMonitor {
    pub async fn start(backend: Backend) -> Self {
        let state = Arc::new(Mutex::new(backend));
        let app = Router::new()
            .route("/api/config", get(config))
            .route("/api/changes", get(changes))
            .route("/api/stats", get(stats))
            .route("/api/debug", get(debug))
            .route("/api/mark-read", post(mark_read))
            .route("/api/mark-all-read", post(mark_all_read))
            .route("/api/save-now", post(save_now))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A command context pointed at this backend with JSON output
    pub fn context(&self) -> CommandContext {
        context_for(&self.url())
    }

    pub fn unread(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .changes
            .iter()
            .filter(|c| !c.is_read)
            .count()
    }
}

impl Drop for MockMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn context_for(url: &str) -> CommandContext {
    let mut config = Config::default();
    config.server.url = url.to_string();
    config.server.timeout_ms = 2000;
    config.output.colors = false;
    CommandContext {
        output: OutputManager::new(config.output.clone()),
        config,
        verbose: false,
        json: true,
        shutdown_token: CancellationToken::new(),
    }
}

pub fn change(id: &str, ts: i64, event_type: &str, is_read: bool) -> ChangeEvent {
    ChangeEvent {
        id: ChangeId::new(id),
        timestamp: Utc.timestamp_opt(ts, 0).unwrap(),
        event_type: event_type.to_string(),
        resource_type: "deployments".to_string(),
        namespace: Some("default".to_string()),
        name: format!("{}-app", id),
        details: format!("Deployment {}", event_type.to_lowercase()),
        is_read,
    }
}

pub fn seeded() -> Backend {
    Backend {
        changes: vec![
            change("d1", 1_000, "ADDED", false),
            change("d2", 2_000, "MODIFIED", false),
            change("d3", 3_000, "DELETED", true),
        ],
        ..Backend::default()
    }
}

async fn config() -> Json<Value> {
    Json(json!({
        "resources": [
            { "name": "deployments", "enabled": true, "description": "Watch Deployments" },
            { "name": "secrets", "enabled": false, "description": "Watch Secrets" }
        ],
        "persistence": {
            "enabled": true,
            "filePath": "k8s-changes.json",
            "autoSave": true,
            "saveInterval": 60
        }
    }))
}

async fn changes(State(state): State<Shared>) -> Json<Vec<ChangeEvent>> {
    Json(state.lock().unwrap().changes.clone())
}

async fn stats(State(state): State<Shared>) -> Json<Value> {
    let state = state.lock().unwrap();
    let unread = state.changes.iter().filter(|c| !c.is_read).count();
    Json(json!({
        "totalChanges": state.changes.len(),
        "unreadChanges": unread,
        "currentSession": state.changes.len(),
        "uptime": "2h5m0s"
    }))
}

async fn debug() -> Json<Value> {
    Json(json!({ "version": "0.9.1" }))
}

async fn mark_read(State(state): State<Shared>, Json(request): Json<MarkReadRequest>) -> Json<Value> {
    let mut state = state.lock().unwrap();
    let success = match state.changes.iter_mut().find(|c| c.id == request.id) {
        Some(change) => {
            change.is_read = true;
            true
        }
        None => false,
    };
    Json(json!({ "success": success }))
}

async fn mark_all_read(State(state): State<Shared>) -> Json<Value> {
    let mut state = state.lock().unwrap();
    let mut count = 0;
    for change in state.changes.iter_mut().filter(|c| !c.is_read) {
        change.is_read = true;
        count += 1;
    }
    Json(json!({ "success": true, "count": count }))
}

async fn save_now(State(state): State<Shared>) -> Json<Value> {
    let mut state = state.lock().unwrap();
    state.saves += 1;
    match &state.save_error {
        Some(error) => Json(json!({ "success": false, "error": error })),
        None => Json(json!({ "success": true })),
    }
}
