// Wire types mirroring the JSON served by the change-monitor backend
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Event types emitted by the Kubernetes watch, in chip order.
pub const EVENT_TYPES: [&str; 3] = ["ADDED", "MODIFIED", "DELETED"];

/// Opaque change identifier assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeId(String);

impl ChangeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChangeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One observed change to a watched resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub id: ChangeId,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub resource_type: String,
    /// `None` for cluster-scoped resources; the backend encodes that as `""`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub is_read: bool,
}

impl ChangeEvent {
    /// Namespace as shown to the user.
    pub fn namespace_or_default(&self) -> &str {
        self.namespace.as_deref().unwrap_or("default")
    }
}

/// Aggregate counters computed by the backend.
///
/// Always replaced as a whole; fields the backend omits decode to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSnapshot {
    pub total_changes: u64,
    pub unread_changes: u64,
    pub current_session: u64,
    pub loaded_from_file: u64,
    pub start_time: Option<DateTime<Utc>>,
    /// Go duration string, e.g. `1h2m3.5s`.
    pub uptime: String,
    pub event_counts: BTreeMap<String, u64>,
    pub resource_counts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    pub name: String,
    pub enabled: bool,
    #[serde(default)]
    pub description: String,
    /// `None` means the resource is watched in all namespaces.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistenceConfig {
    pub enabled: bool,
    pub file_path: String,
    pub auto_save: bool,
    /// Seconds between automatic saves.
    pub save_interval: u64,
}

/// Backend configuration: which resource types are watched and how the
/// change log is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl ConfigSnapshot {
    /// Names of the enabled resource types, in backend order.
    pub fn enabled_resources(&self) -> Vec<String> {
        self.resources
            .iter()
            .filter(|r| r.enabled)
            .map(|r| r.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    #[serde(default)]
    pub version: Option<String>,
}

impl VersionInfo {
    pub fn display_version(&self) -> &str {
        match self.version.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => "dev",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadRequest {
    pub id: ChangeId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkReadResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkAllReadResponse {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveNowResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
