//! Filter state for the change list.
//!
//! The store is the single source of truth for what the user has selected.
//! Presentation reads from it and reports chip clicks back through
//! [`FilterStore::select_single`] and [`FilterStore::toggle_multi`]; nothing
//! is ever read back out of the rendered UI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::models::EVENT_TYPES;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    #[default]
    All,
    Read,
    Unread,
}

/// A value in one of the single-select groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleSelection {
    Sort(SortOrder),
    Status(ReadStatus),
}

/// The multi-select groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiGroup {
    EventType,
    ResourceType,
}

/// The four filter dimensions.
///
/// An empty multi-select set places no restriction on its dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub sort_order: SortOrder,
    pub read_status: ReadStatus,
    pub event_types: BTreeSet<String>,
    pub resource_types: BTreeSet<String>,
}

impl FilterState {
    /// Whether any predicate currently narrows the list
    pub fn is_restrictive(&self) -> bool {
        self.read_status != ReadStatus::All
            || !self.event_types.is_empty()
            || !self.resource_types.is_empty()
    }
}

/// Filter state plus the chip universes it is rendered against
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    state: FilterState,
    resource_universe: Option<Vec<String>>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn sort_order(&self) -> SortOrder {
        self.state.sort_order
    }

    pub fn read_status(&self) -> ReadStatus {
        self.state.read_status
    }

    pub fn event_types(&self) -> &BTreeSet<String> {
        &self.state.event_types
    }

    pub fn resource_types(&self) -> &BTreeSet<String> {
        &self.state.resource_types
    }

    /// Select a value in a single-select group, replacing its sibling.
    pub fn select_single(&mut self, selection: SingleSelection) {
        match selection {
            SingleSelection::Sort(order) => self.state.sort_order = order,
            SingleSelection::Status(status) => self.state.read_status = status,
        }
    }

    /// Flip membership of `value` in a multi-select group.
    ///
    /// Any value is accepted, including resource types the backend has not
    /// announced yet. Returns whether the value is selected afterwards.
    pub fn toggle_multi(&mut self, group: MultiGroup, value: impl Into<String>) -> bool {
        let value = value.into();
        let set = self.group_mut(group);
        if set.remove(&value) {
            false
        } else {
            set.insert(value);
            true
        }
    }

    pub fn is_selected(&self, group: MultiGroup, value: &str) -> bool {
        match group {
            MultiGroup::EventType => self.state.event_types.contains(value),
            MultiGroup::ResourceType => self.state.resource_types.contains(value),
        }
    }

    /// Install a new resource-type universe from the backend config.
    ///
    /// Selections for types still in the universe survive; the rest are
    /// dropped.
    pub fn set_resource_universe(&mut self, enabled: Vec<String>) {
        self.state
            .resource_types
            .retain(|selected| enabled.iter().any(|name| name == selected));
        self.resource_universe = Some(enabled);
    }

    /// Resource-type chips, or `None` before the first config load
    pub fn resource_universe(&self) -> Option<&[String]> {
        self.resource_universe.as_deref()
    }

    pub fn event_type_universe(&self) -> &'static [&'static str] {
        &EVENT_TYPES
    }

    /// Restore default selections, keeping the known universes
    pub fn reset(&mut self) {
        self.state = FilterState::default();
    }

    fn group_mut(&mut self, group: MultiGroup) -> &mut BTreeSet<String> {
        match group {
            MultiGroup::EventType => &mut self.state.event_types,
            MultiGroup::ResourceType => &mut self.state.resource_types,
        }
    }
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }
}

impl ReadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadStatus::All => "all",
            ReadStatus::Read => "read",
            ReadStatus::Unread => "unread",
        }
    }

    /// Next status in chip order: all → unread → read
    pub fn next(self) -> Self {
        match self {
            ReadStatus::All => ReadStatus::Unread,
            ReadStatus::Unread => ReadStatus::Read,
            ReadStatus::Read => ReadStatus::All,
        }
    }

    pub fn admits(&self, is_read: bool) -> bool {
        match self {
            ReadStatus::All => true,
            ReadStatus::Read => is_read,
            ReadStatus::Unread => !is_read,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ReadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a filter value cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {group} '{value}' (expected one of: {expected})")]
pub struct ParseFilterError {
    pub group: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl FromStr for SortOrder {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            _ => Err(ParseFilterError {
                group: "sort order",
                value: s.to_string(),
                expected: "newest, oldest",
            }),
        }
    }
}

impl FromStr for ReadStatus {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ReadStatus::All),
            "read" => Ok(ReadStatus::Read),
            "unread" => Ok(ReadStatus::Unread),
            _ => Err(ParseFilterError {
                group: "read status",
                value: s.to_string(),
                expected: "all, read, unread",
            }),
        }
    }
}
