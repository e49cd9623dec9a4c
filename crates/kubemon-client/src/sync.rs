use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::client::MonitorClient;
use crate::error::ClientError;
use crate::models::{ChangeEvent, ConfigSnapshot, StatsSnapshot, VersionInfo};

/// Severity of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A short-lived message for the user
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: Instant,
}

impl Notification {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

/// The result of one fetch (or a notification), tagged with the sequence
/// number taken when the request was issued.
#[derive(Debug)]
pub struct SyncUpdate {
    pub seq: u64,
    pub kind: UpdateKind,
}

#[derive(Debug)]
pub enum UpdateKind {
    Config(Result<ConfigSnapshot, ClientError>),
    Changes(Result<Vec<ChangeEvent>, ClientError>),
    Stats(Result<StatsSnapshot, ClientError>),
    Version(VersionInfo),
    Notice(Notification),
}

pub type UpdateSender = mpsc::UnboundedSender<SyncUpdate>;
pub type UpdateReceiver = mpsc::UnboundedReceiver<SyncUpdate>;

/// Issues fetch sets against the backend and forwards their results.
///
/// The synchronizer never touches dashboard state. Results travel over the
/// update channel to whoever owns the [`Dashboard`](crate::Dashboard), which
/// uses the sequence numbers to drop results that were overtaken by a later
/// request.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    client: MonitorClient,
    seq: Arc<AtomicU64>,
    updates: UpdateSender,
}

impl Synchronizer {
    pub fn new(client: MonitorClient) -> (Self, UpdateReceiver) {
        let (updates, rx) = mpsc::unbounded_channel();
        let sync = Self {
            client,
            seq: Arc::new(AtomicU64::new(0)),
            updates,
        };
        (sync, rx)
    }

    pub fn client(&self) -> &MonitorClient {
        &self.client
    }

    /// Startup load: config, then changes and stats
    pub async fn load_initial(&self) {
        self.load_config().await;
        self.refresh().await;
    }

    pub async fn load_config(&self) {
        let seq = self.next_seq();
        let result = self.client.fetch_config().await;
        if let Err(ref e) = result {
            warn!("Error loading config: {}", e);
        }
        self.emit(seq, UpdateKind::Config(result));
    }

    /// Fetch changes and stats concurrently; each lands independently.
    pub async fn refresh(&self) {
        let changes_seq = self.next_seq();
        let stats_seq = self.next_seq();
        debug!("Refreshing changes (seq {}) and stats (seq {})", changes_seq, stats_seq);

        let changes = async {
            let result = self.client.fetch_changes().await;
            if let Err(ref e) = result {
                warn!("Error loading changes: {}", e);
            }
            self.emit(changes_seq, UpdateKind::Changes(result));
        };
        let stats = async {
            let result = self.client.fetch_stats().await;
            if let Err(ref e) = result {
                warn!("Error loading stats: {}", e);
            }
            self.emit(stats_seq, UpdateKind::Stats(result));
        };

        tokio::join!(changes, stats);
    }

    pub async fn load_version(&self) {
        let seq = self.next_seq();
        let info = match self.client.fetch_version().await {
            Ok(info) => info,
            Err(e) => {
                warn!("Error loading version: {}", e);
                VersionInfo::default()
            }
        };
        self.emit(seq, UpdateKind::Version(info));
    }

    pub fn notify(&self, notification: Notification) {
        let seq = self.next_seq();
        self.emit(seq, UpdateKind::Notice(notification));
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn emit(&self, seq: u64, kind: UpdateKind) {
        // The receiver is gone once the dashboard shuts down
        if self.updates.send(SyncUpdate { seq, kind }).is_err() {
            debug!("Dropping update {}: receiver closed", seq);
        }
    }
}
