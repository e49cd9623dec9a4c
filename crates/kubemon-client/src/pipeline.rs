//! Filter, sort and bound the change list for display.

use crate::filters::{FilterState, SortOrder};
use crate::models::ChangeEvent;

/// Maximum number of rows handed to the presentation layer.
pub const DISPLAY_LIMIT: usize = 100;

/// Why the list is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// The backend has not recorded any change yet
    NoChanges,
    /// Changes exist but every one is filtered out
    NoMatches,
}

impl Placeholder {
    pub fn title(&self) -> &'static str {
        "Ready to Monitor"
    }

    pub fn message(&self) -> &'static str {
        match self {
            Placeholder::NoChanges => "No changes detected yet...",
            Placeholder::NoMatches => "No changes match the current filters",
        }
    }
}

/// Output of [`apply`]
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredChanges<'a> {
    /// Sorted, bounded rows
    pub rows: Vec<&'a ChangeEvent>,
    /// Number of changes before filtering
    pub total: usize,
    /// Number of changes that passed the filters, before the display limit
    pub matched: usize,
}

impl FilteredChanges<'_> {
    pub fn placeholder(&self) -> Option<Placeholder> {
        if !self.rows.is_empty() {
            None
        } else if self.total == 0 {
            Some(Placeholder::NoChanges)
        } else {
            Some(Placeholder::NoMatches)
        }
    }

    /// Whether matching rows were cut off by the display limit
    pub fn is_truncated(&self) -> bool {
        self.matched > self.rows.len()
    }
}

/// Whether `change` survives every active predicate in `filter`
pub fn matches(change: &ChangeEvent, filter: &FilterState) -> bool {
    filter.read_status.admits(change.is_read)
        && (filter.event_types.is_empty() || filter.event_types.contains(&change.event_type))
        && (filter.resource_types.is_empty()
            || filter.resource_types.contains(&change.resource_type))
}

/// Apply the filters, sort by timestamp and bound to [`DISPLAY_LIMIT`].
///
/// The sort is stable: changes with equal timestamps keep their input order
/// in both directions.
pub fn apply<'a>(changes: &'a [ChangeEvent], filter: &FilterState) -> FilteredChanges<'a> {
    let mut rows: Vec<&ChangeEvent> = changes.iter().filter(|c| matches(c, filter)).collect();

    match filter.sort_order {
        SortOrder::Newest => rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::Oldest => rows.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
    }

    let matched = rows.len();
    rows.truncate(DISPLAY_LIMIT);

    FilteredChanges {
        rows,
        total: changes.len(),
        matched,
    }
}
