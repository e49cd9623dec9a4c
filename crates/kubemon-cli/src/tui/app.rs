use ratatui::widgets::ListState;
use std::time::Instant;

use kubemon_client::models::EVENT_TYPES;
use kubemon_client::{
    ChangeEvent, ChangeId, Dashboard, MultiGroup, Notification, SingleSelection, SyncUpdate,
};

/// UI state for the live dashboard.
///
/// Wraps the client [`Dashboard`] with what only the terminal needs:
/// selection, chip focus and which overlays are open.
#[derive(Debug)]
pub struct DashboardApp {
    pub dashboard: Dashboard,
    pub server_url: String,
    pub list_state: ListState,
    /// Index of the focused resource-type chip
    pub chip_cursor: usize,
    pub auto_refresh: bool,
    pub show_help: bool,
    pub show_config: bool,
    pub should_quit: bool,
    /// Rows visible in the change list, updated on every draw
    pub page_size: usize,
}

impl DashboardApp {
    pub fn new(server_url: impl Into<String>, auto_refresh: bool) -> Self {
        Self {
            dashboard: Dashboard::new(),
            server_url: server_url.into(),
            list_state: ListState::default(),
            chip_cursor: 0,
            auto_refresh,
            show_help: false,
            show_config: false,
            should_quit: false,
            page_size: 10,
        }
    }

    /// Fold a background update in, keeping the highlight on the same change
    pub fn apply_update(&mut self, update: SyncUpdate) -> bool {
        let previous = self.selected_id();
        let changed = self.dashboard.apply(update);
        if changed {
            self.restore_selection(previous);
            self.clamp_chip_cursor();
        }
        changed
    }

    pub fn notify(&mut self, notice: Notification) {
        self.dashboard.push_notice(notice);
    }

    pub fn expire_notices(&mut self) -> bool {
        self.dashboard.expire_notices(Instant::now())
    }

    fn visible_rows(&self) -> usize {
        self.dashboard.view().rows().len()
    }

    /// The highlighted change, if any row is shown
    pub fn selected_change(&self) -> Option<&ChangeEvent> {
        let index = self.list_state.selected()?;
        self.dashboard.view().rows().get(index).copied()
    }

    fn selected_id(&self) -> Option<ChangeId> {
        self.selected_change().map(|change| change.id.clone())
    }

    /// Select `previous` again if it is still listed, otherwise clamp
    fn restore_selection(&mut self, previous: Option<ChangeId>) {
        let index = previous.and_then(|id| {
            self.dashboard
                .view()
                .rows()
                .iter()
                .position(|change| change.id == id)
        });
        match index {
            Some(index) => self.list_state.select(Some(index)),
            None => self.clamp_selection(),
        }
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_previous(&mut self) {
        self.move_selection(-1);
    }

    pub fn page_down(&mut self) {
        self.move_selection(self.page_size as isize);
    }

    pub fn page_up(&mut self) {
        self.move_selection(-(self.page_size as isize));
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_rows();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.list_state.select(Some(next as usize));
    }

    /// Keep the selection on a visible row after the list changes
    pub fn clamp_selection(&mut self) {
        let len = self.visible_rows();
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(index)) => Some(index.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    pub fn toggle_sort(&mut self) {
        let previous = self.selected_id();
        let order = self.dashboard.filters().sort_order().toggled();
        self.dashboard
            .filters_mut()
            .select_single(SingleSelection::Sort(order));
        self.restore_selection(previous);
    }

    pub fn cycle_status(&mut self) {
        let previous = self.selected_id();
        let status = self.dashboard.filters().read_status().next();
        self.dashboard
            .filters_mut()
            .select_single(SingleSelection::Status(status));
        self.restore_selection(previous);
    }

    /// Toggle the event-type chip at `index` (0-based)
    pub fn toggle_event_type(&mut self, index: usize) {
        if let Some(event_type) = EVENT_TYPES.get(index) {
            let previous = self.selected_id();
            self.dashboard
                .filters_mut()
                .toggle_multi(MultiGroup::EventType, *event_type);
            self.restore_selection(previous);
        }
    }

    fn resource_chip_count(&self) -> usize {
        self.dashboard
            .filters()
            .resource_universe()
            .map(|chips| chips.len())
            .unwrap_or(0)
    }

    pub fn focus_next_chip(&mut self) {
        let count = self.resource_chip_count();
        if count > 0 {
            self.chip_cursor = (self.chip_cursor + 1) % count;
        }
    }

    pub fn focus_previous_chip(&mut self) {
        let count = self.resource_chip_count();
        if count > 0 {
            self.chip_cursor = (self.chip_cursor + count - 1) % count;
        }
    }

    /// Toggle the resource-type chip under the cursor
    pub fn toggle_focused_chip(&mut self) {
        let chip = self
            .dashboard
            .filters()
            .resource_universe()
            .and_then(|chips| chips.get(self.chip_cursor))
            .cloned();
        if let Some(resource) = chip {
            let previous = self.selected_id();
            self.dashboard
                .filters_mut()
                .toggle_multi(MultiGroup::ResourceType, resource);
            self.restore_selection(previous);
        }
    }

    pub fn reset_filters(&mut self) {
        let previous = self.selected_id();
        self.dashboard.filters_mut().reset();
        self.restore_selection(previous);
    }

    /// Keep the chip cursor inside the universe after a config reload
    pub fn clamp_chip_cursor(&mut self) {
        let count = self.resource_chip_count();
        if self.chip_cursor >= count {
            self.chip_cursor = count.saturating_sub(1);
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_config(&mut self) {
        self.show_config = !self.show_config;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
