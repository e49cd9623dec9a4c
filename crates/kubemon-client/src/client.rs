use reqwest::{Client, Method, RequestBuilder, Url};
pub use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::models::{
    ChangeEvent, ChangeId, ConfigSnapshot, MarkAllReadResponse, MarkReadRequest,
    MarkReadResponse, SaveNowResponse, StatsSnapshot, VersionInfo,
};

// Relative to the base URL so a path prefix in `--server` is kept
pub const CONFIG_PATH: &str = "api/config";
pub const CHANGES_PATH: &str = "api/changes";
pub const STATS_PATH: &str = "api/stats";
pub const DEBUG_PATH: &str = "api/debug";
pub const MARK_READ_PATH: &str = "api/mark-read";
pub const MARK_ALL_READ_PATH: &str = "api/mark-all-read";
pub const SAVE_NOW_PATH: &str = "api/save-now";

/// HTTP client for the change-monitor backend.
///
/// Every call is a single request/response; the backend always answers GETs
/// with a full snapshot. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct MonitorClient {
    http: Client,
    base_url: Url,
}

impl MonitorClient {
    /// Create a client for the backend at `base_url` (e.g. `http://127.0.0.1:8080`
    /// or `http://gateway/monitor` behind a proxy prefix)
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn fetch_config(&self) -> ClientResult<ConfigSnapshot> {
        self.send_json(self.request(Method::GET, CONFIG_PATH)?, CONFIG_PATH)
            .await
    }

    pub async fn fetch_changes(&self) -> ClientResult<Vec<ChangeEvent>> {
        // An empty change log is encoded as `null`
        let changes: Option<Vec<ChangeEvent>> = self
            .send_json(self.request(Method::GET, CHANGES_PATH)?, CHANGES_PATH)
            .await?;
        let changes = changes.unwrap_or_default();
        debug!("Fetched {} changes", changes.len());
        Ok(changes)
    }

    pub async fn fetch_stats(&self) -> ClientResult<StatsSnapshot> {
        self.send_json(self.request(Method::GET, STATS_PATH)?, STATS_PATH)
            .await
    }

    pub async fn fetch_version(&self) -> ClientResult<VersionInfo> {
        self.send_json(self.request(Method::GET, DEBUG_PATH)?, DEBUG_PATH)
            .await
    }

    /// Ask the backend to mark one change as read.
    ///
    /// Returns the backend's `success` flag; an unknown id yields `false`.
    pub async fn mark_read(&self, id: &ChangeId) -> ClientResult<bool> {
        let body = MarkReadRequest { id: id.clone() };
        let response: MarkReadResponse = self
            .send_json(
                self.request(Method::POST, MARK_READ_PATH)?.json(&body),
                MARK_READ_PATH,
            )
            .await?;
        Ok(response.success)
    }

    /// Mark every change as read, returning how many were affected
    pub async fn mark_all_read(&self) -> ClientResult<u64> {
        let response: MarkAllReadResponse = self
            .send_json(
                self.request(Method::POST, MARK_ALL_READ_PATH)?,
                MARK_ALL_READ_PATH,
            )
            .await?;
        Ok(response.count)
    }

    /// Trigger an immediate write of the change log on the backend
    pub async fn save_now(&self) -> ClientResult<SaveNowResponse> {
        self.send_json(self.request(Method::POST, SAVE_NOW_PATH)?, SAVE_NOW_PATH)
            .await
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })?;
        Ok(self.http.request(method, url))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| ClientError::Transport {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        response.json::<T>().await.map_err(|e| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}
