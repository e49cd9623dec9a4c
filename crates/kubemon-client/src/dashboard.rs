//! Client-side dashboard state and its view.
//!
//! [`Dashboard`] is owned by a single task (the UI loop). Background work
//! never mutates it directly; it receives [`SyncUpdate`]s and folds them in
//! with [`Dashboard::apply`]. [`Dashboard::view`] is a pure function of the
//! current state and is called after every change.

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::filters::FilterStore;
use crate::models::{ChangeEvent, ConfigSnapshot, StatsSnapshot};
use crate::pipeline::{self, FilteredChanges, Placeholder};
use crate::sync::{Notification, SyncUpdate, UpdateKind};

/// How long a notification stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Last known state of the change list
#[derive(Debug, Clone, Default)]
pub enum ChangeFeed {
    #[default]
    Pending,
    Loaded(Vec<ChangeEvent>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, Default)]
struct Accepted {
    config: u64,
    changes: u64,
    stats: u64,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    filters: FilterStore,
    feed: ChangeFeed,
    stats: Option<StatsSnapshot>,
    config: Option<ConfigSnapshot>,
    version: Option<String>,
    notices: VecDeque<Notification>,
    accepted: Accepted,
}

/// What the list area should show
#[derive(Debug, Clone, PartialEq)]
pub enum ListContent<'a> {
    /// Nothing fetched yet
    Loading,
    Rows(FilteredChanges<'a>),
    Empty(Placeholder),
    /// The last change fetch failed
    Unavailable(&'a str),
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub list: ListContent<'a>,
    pub stats: Option<&'a StatsSnapshot>,
    pub config: Option<&'a ConfigSnapshot>,
    pub filters: &'a FilterStore,
    pub version: &'a str,
    pub notices: &'a VecDeque<Notification>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterStore {
        &mut self.filters
    }

    pub fn changes(&self) -> &[ChangeEvent] {
        match &self.feed {
            ChangeFeed::Loaded(changes) => changes,
            _ => &[],
        }
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    pub fn stats(&self) -> Option<&StatsSnapshot> {
        self.stats.as_ref()
    }

    pub fn config(&self) -> Option<&ConfigSnapshot> {
        self.config.as_ref()
    }

    /// Fold one update into the state.
    ///
    /// Results older than the newest accepted result for the same concern are
    /// discarded. Returns whether the state changed.
    pub fn apply(&mut self, update: SyncUpdate) -> bool {
        let SyncUpdate { seq, kind } = update;
        match kind {
            UpdateKind::Config(result) => {
                if !accept(&mut self.accepted.config, seq) {
                    return false;
                }
                match result {
                    Ok(config) => {
                        self.filters.set_resource_universe(config.enabled_resources());
                        self.config = Some(config);
                        true
                    }
                    // Keep the previous config and chips
                    Err(_) => false,
                }
            }
            UpdateKind::Changes(result) => {
                if !accept(&mut self.accepted.changes, seq) {
                    return false;
                }
                self.feed = match result {
                    Ok(changes) => ChangeFeed::Loaded(changes),
                    Err(e) => ChangeFeed::Failed(e.to_string()),
                };
                true
            }
            UpdateKind::Stats(result) => {
                if !accept(&mut self.accepted.stats, seq) {
                    return false;
                }
                match result {
                    Ok(stats) => {
                        self.stats = Some(stats);
                        true
                    }
                    Err(_) => false,
                }
            }
            UpdateKind::Version(info) => {
                self.version = Some(info.display_version().to_string());
                true
            }
            UpdateKind::Notice(notice) => {
                self.notices.push_back(notice);
                true
            }
        }
    }

    pub fn push_notice(&mut self, notice: Notification) {
        self.notices.push_back(notice);
    }

    /// Drop notifications older than [`NOTICE_TTL`]. Returns whether any expired.
    pub fn expire_notices(&mut self, now: Instant) -> bool {
        let before = self.notices.len();
        self.notices
            .retain(|n| now.saturating_duration_since(n.raised_at) < NOTICE_TTL);
        before != self.notices.len()
    }

    pub fn view(&self) -> DashboardView<'_> {
        let list = match &self.feed {
            ChangeFeed::Pending => ListContent::Loading,
            ChangeFeed::Failed(reason) => ListContent::Unavailable(reason),
            ChangeFeed::Loaded(changes) => {
                let filtered = pipeline::apply(changes, self.filters.state());
                match filtered.placeholder() {
                    Some(placeholder) => ListContent::Empty(placeholder),
                    None => ListContent::Rows(filtered),
                }
            }
        };

        DashboardView {
            list,
            stats: self.stats.as_ref(),
            config: self.config.as_ref(),
            filters: &self.filters,
            version: self.version.as_deref().unwrap_or("dev"),
            notices: &self.notices,
        }
    }
}

impl<'a> DashboardView<'a> {
    /// Rows currently displayed, empty when a placeholder is shown
    pub fn rows(&self) -> &[&'a ChangeEvent] {
        match &self.list {
            ListContent::Rows(filtered) => &filtered.rows,
            _ => &[],
        }
    }
}

fn accept(latest: &mut u64, seq: u64) -> bool {
    if seq < *latest {
        debug!("Discarding stale update {} (latest {})", seq, latest);
        return false;
    }
    *latest = seq;
    true
}
