//! In-process mock of the change-monitor backend.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use kubemon_client::models::{
    ChangeEvent, ChangeId, ConfigSnapshot, MarkReadRequest, MarkReadResponse, PersistenceConfig,
    ResourceConfig, SaveNowResponse, StatsSnapshot,
};
use kubemon_client::MonitorClient;

#[derive(Debug, Default)]
pub struct BackendState {
    pub changes: Vec<ChangeEvent>,
    pub resources: Vec<ResourceConfig>,
    pub fail_changes: bool,
    pub fail_stats: bool,
    pub null_changes: bool,
    pub save_error: Option<String>,
    pub change_hits: usize,
    pub stats_hits: usize,
}

pub type SharedState = Arc<Mutex<BackendState>>;

pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: SharedState,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start(state: BackendState) -> Self {
        let state = Arc::new(Mutex::new(state));

        let app = Router::new()
            .route("/api/config", get(get_config))
            .route("/api/changes", get(get_changes))
            .route("/api/stats", get(get_stats))
            .route("/api/debug", get(get_debug))
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

    pub fn client(&self) -> MonitorClient {
        MonitorClient::new(&format!("http://{}", self.addr), Duration::from_secs(5)).unwrap()
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn change(id: &str, ts: i64, event_type: &str, resource_type: &str, is_read: bool) -> ChangeEvent {
    ChangeEvent {
        id: ChangeId::new(id),
        timestamp: Utc.timestamp_opt(ts, 0).unwrap(),
        event_type: event_type.to_string(),
        resource_type: resource_type.to_string(),
        namespace: Some("default".to_string()),
        name: format!("{}-name", id),
        details: format!("{} {}", resource_type, event_type),
        is_read,
    }
}

pub fn resource(name: &str, enabled: bool) -> ResourceConfig {
    ResourceConfig {
        name: name.to_string(),
        enabled,
        description: format!("Watch {}", name),
        namespace: None,
    }
}

/// Two unread pods changes and one read service change
pub fn seeded_state() -> BackendState {
    BackendState {
        changes: vec![
            change("c1", 100, "ADDED", "pods", false),
            change("c2", 200, "MODIFIED", "pods", false),
            change("c3", 300, "DELETED", "services", true),
        ],
        resources: vec![resource("pods", true), resource("services", true)],
        ..BackendState::default()
    }
}

async fn get_config(State(state): State<SharedState>) -> Json<ConfigSnapshot> {
    let state = state.lock().unwrap();
    Json(ConfigSnapshot {
        resources: state.resources.clone(),
        persistence: PersistenceConfig {
            enabled: true,
            file_path: "k8s-changes.json".to_string(),
            auto_save: true,
            save_interval: 30,
        },
    })
}

async fn get_changes(State(state): State<SharedState>) -> Result<Json<Value>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.change_hits += 1;
    if state.fail_changes {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    if state.null_changes {
        return Ok(Json(Value::Null));
    }
    Ok(Json(serde_json::to_value(&state.changes).unwrap()))
}

async fn get_stats(State(state): State<SharedState>) -> Result<Json<StatsSnapshot>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.stats_hits += 1;
    if state.fail_stats {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    let unread = state.changes.iter().filter(|c| !c.is_read).count() as u64;
    Ok(Json(StatsSnapshot {
        total_changes: state.changes.len() as u64,
        unread_changes: unread,
        current_session: state.changes.len() as u64,
        uptime: "1m30.5s".to_string(),
        ..StatsSnapshot::default()
    }))
}

async fn get_debug() -> Json<Value> {
    Json(json!({ "version": "1.2.3" }))
}

async fn mark_read(
    State(state): State<SharedState>,
    Json(request): Json<MarkReadRequest>,
) -> Json<MarkReadResponse> {
    let mut state = state.lock().unwrap();
    let success = match state.changes.iter_mut().find(|c| c.id == request.id) {
        Some(change) => {
            change.is_read = true;
            true
        }
        None => false,
    };
    Json(MarkReadResponse { success })
}

async fn mark_all_read(State(state): State<SharedState>) -> Json<Value> {
    let mut state = state.lock().unwrap();
    let mut count = 0;
    for change in state.changes.iter_mut().filter(|c| !c.is_read) {
        change.is_read = true;
        count += 1;
    }
    Json(json!({ "success": true, "count": count }))
}

async fn save_now(State(state): State<SharedState>) -> Json<SaveNowResponse> {
    let state = state.lock().unwrap();
    Json(SaveNowResponse {
        success: state.save_error.is_none(),
        error: state.save_error.clone(),
    })
}
