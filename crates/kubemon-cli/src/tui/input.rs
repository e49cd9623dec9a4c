use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    Quit,
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    ToggleAutoRefresh,
    Refresh,
    MarkSelectedRead,
    MarkAllRead,
    SaveNow,
    ToggleSort,
    CycleStatus,
    ToggleEventType(usize),
    PreviousChip,
    NextChip,
    ToggleChip,
    ResetFilters,
    ToggleConfig,
    ToggleHelp,
    None,
}

/// Wait up to `timeout` for a key press and map it to an action
pub fn handle_input(timeout: Duration, help_visible: bool) -> CliResult<DashboardAction> {
    if event::poll(timeout).map_err(|e| CliError::terminal("poll for input", e))? {
        if let Event::Key(key) = event::read().map_err(|e| CliError::terminal("read input", e))? {
            // Only handle key press events, not key release
            if key.kind == KeyEventKind::Press {
                return Ok(map_key(key, help_visible));
            }
        }
    }
    Ok(DashboardAction::None)
}

pub fn map_key(key: KeyEvent, help_visible: bool) -> DashboardAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return DashboardAction::Quit;
    }

    // The help overlay swallows everything except its own toggles
    if help_visible {
        return match key.code {
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::Esc | KeyCode::F(1) => {
                DashboardAction::ToggleHelp
            }
            KeyCode::Char('q') => DashboardAction::Quit,
            _ => DashboardAction::None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => DashboardAction::Quit,
        KeyCode::Up | KeyCode::Char('k') => DashboardAction::NavigateUp,
        KeyCode::Down | KeyCode::Char('j') => DashboardAction::NavigateDown,
        KeyCode::PageUp => DashboardAction::PageUp,
        KeyCode::PageDown => DashboardAction::PageDown,
        KeyCode::Char('a') => DashboardAction::ToggleAutoRefresh,
        KeyCode::Char('r') => DashboardAction::Refresh,
        KeyCode::Char('m') | KeyCode::Enter => DashboardAction::MarkSelectedRead,
        KeyCode::Char('M') => DashboardAction::MarkAllRead,
        KeyCode::Char('S') => DashboardAction::SaveNow,
        KeyCode::Char('s') => DashboardAction::ToggleSort,
        KeyCode::Char('u') => DashboardAction::CycleStatus,
        KeyCode::Char(c @ '1'..='3') => {
            DashboardAction::ToggleEventType(c as usize - '1' as usize)
        }
        KeyCode::Left => DashboardAction::PreviousChip,
        KeyCode::Right => DashboardAction::NextChip,
        KeyCode::Char(' ') => DashboardAction::ToggleChip,
        KeyCode::Char('x') => DashboardAction::ResetFilters,
        KeyCode::Char('c') => DashboardAction::ToggleConfig,
        KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => DashboardAction::ToggleHelp,
        _ => DashboardAction::None,
    }
}

pub const HELP_TEXT: &str = r#"
kubemon Dashboard - Keyboard Controls

Navigation:
  ↑/k          Move up in change list
  ↓/j          Move down in change list
  PgUp/PgDn    Page through changes

Changes:
  m/Enter      Mark selected change as read
  M            Mark all changes as read
  S            Save change log to file now
  r            Refresh now

Filters:
  s            Toggle sort (newest/oldest)
  u            Cycle status (all/unread/read)
  1/2/3        Toggle ADDED/MODIFIED/DELETED
  ←/→          Move resource chip focus
  Space        Toggle focused resource chip
  x            Reset all filters

View:
  a            Toggle auto-refresh
  c            Show/hide watched resources
  h/?/F1       Show/hide this help
  q/Esc        Quit
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_case_sensitive_bindings() {
        assert_eq!(map_key(key(KeyCode::Char('m')), false), DashboardAction::MarkSelectedRead);
        assert_eq!(map_key(key(KeyCode::Char('M')), false), DashboardAction::MarkAllRead);
        assert_eq!(map_key(key(KeyCode::Char('s')), false), DashboardAction::ToggleSort);
        assert_eq!(map_key(key(KeyCode::Char('S')), false), DashboardAction::SaveNow);
    }

    #[test]
    fn test_event_type_digits() {
        assert_eq!(
            map_key(key(KeyCode::Char('1')), false),
            DashboardAction::ToggleEventType(0)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('3')), false),
            DashboardAction::ToggleEventType(2)
        );
        assert_eq!(map_key(key(KeyCode::Char('4')), false), DashboardAction::None);
    }

    #[test]
    fn test_help_overlay_captures_keys() {
        assert_eq!(map_key(key(KeyCode::Char('M')), true), DashboardAction::None);
        assert_eq!(map_key(key(KeyCode::Esc), true), DashboardAction::ToggleHelp);
        assert_eq!(map_key(key(KeyCode::Char('q')), true), DashboardAction::Quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, false), DashboardAction::Quit);
        assert_eq!(map_key(key(KeyCode::Char('c')), false), DashboardAction::ToggleConfig);
    }
}
