//! # kubemon client
//!
//! Client-side engine for the kubemon change dashboard. It polls the
//! change-monitor backend over HTTP, composes the user's filters into a
//! display list and performs read-state mutations that are always confirmed
//! by a fresh fetch.
//!
//! The pieces, leaf first:
//!
//! - [`FilterStore`]: the selected sort order, read status, event types and
//!   resource types.
//! - [`MonitorClient`]: the HTTP contract with the backend.
//! - [`pipeline`]: filter, sort and bound a change list.
//! - [`Synchronizer`]: issues fetches and forwards sequenced results.
//! - [`MutationCoordinator`]: mark-read, mark-all-read, save-now.
//! - [`PollScheduler`]: the auto-refresh timer.
//! - [`Dashboard`]: owns client state and renders a [`DashboardView`].

pub mod client;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod models;
pub mod mutation;
pub mod pipeline;
pub mod scheduler;
pub mod sync;

pub use client::MonitorClient;
pub use dashboard::{ChangeFeed, Dashboard, DashboardView, ListContent};
pub use error::{ClientError, ClientResult};
pub use filters::{FilterState, FilterStore, MultiGroup, ReadStatus, SingleSelection, SortOrder};
pub use models::{ChangeEvent, ChangeId, ConfigSnapshot, StatsSnapshot, VersionInfo};
pub use mutation::MutationCoordinator;
pub use pipeline::{FilteredChanges, Placeholder, DISPLAY_LIMIT};
pub use scheduler::{PollScheduler, DEFAULT_POLL_INTERVAL};
pub use sync::{NoticeLevel, Notification, SyncUpdate, Synchronizer, UpdateKind, UpdateReceiver};
