pub mod app;
pub mod components;
pub mod input;
pub mod ui;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kubemon_client::{MutationCoordinator, Notification, PollScheduler, UpdateReceiver};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{CliError, CliResult};
use app::DashboardApp;
use input::{handle_input, DashboardAction};
use ui::render_ui;

const INPUT_POLL: Duration = Duration::from_millis(50);
const FRAME_DELAY: Duration = Duration::from_millis(16);

/// Everything the dashboard loop drives besides its own view state
pub struct DashboardSession {
    pub coordinator: MutationCoordinator,
    pub scheduler: PollScheduler,
    pub updates: UpdateReceiver,
    /// Where the auto-refresh toggle is recorded; `None` skips persistence
    pub settings_file: Option<PathBuf>,
}

impl DashboardSession {
    /// Apply one user action. Backend calls run as background tasks and
    /// report back through the update channel.
    pub fn dispatch(&mut self, app: &mut DashboardApp, action: DashboardAction) {
        match action {
            DashboardAction::Quit => app.quit(),
            DashboardAction::NavigateUp => app.select_previous(),
            DashboardAction::NavigateDown => app.select_next(),
            DashboardAction::PageUp => app.page_up(),
            DashboardAction::PageDown => app.page_down(),
            DashboardAction::ToggleAutoRefresh => {
                let enabled = self.scheduler.toggle();
                app.auto_refresh = enabled;
                debug!("Toggled auto-refresh: enabled={}", enabled);
                self.persist_auto_refresh(app, enabled);
            }
            DashboardAction::Refresh => {
                let coordinator = self.coordinator.clone();
                tokio::spawn(async move { coordinator.refresh().await });
            }
            DashboardAction::MarkSelectedRead => {
                // Already-read rows have nothing to mark
                let Some(change) = app.selected_change().filter(|c| !c.is_read) else {
                    return;
                };
                let id = change.id.clone();
                let coordinator = self.coordinator.clone();
                tokio::spawn(async move {
                    let _ = coordinator.mark_read(&id).await;
                });
            }
            DashboardAction::MarkAllRead => {
                let coordinator = self.coordinator.clone();
                tokio::spawn(async move {
                    let _ = coordinator.mark_all_read().await;
                });
            }
            DashboardAction::SaveNow => {
                let coordinator = self.coordinator.clone();
                tokio::spawn(async move {
                    let _ = coordinator.force_save().await;
                });
            }
            DashboardAction::ToggleSort => app.toggle_sort(),
            DashboardAction::CycleStatus => app.cycle_status(),
            DashboardAction::ToggleEventType(index) => app.toggle_event_type(index),
            DashboardAction::PreviousChip => app.focus_previous_chip(),
            DashboardAction::NextChip => app.focus_next_chip(),
            DashboardAction::ToggleChip => app.toggle_focused_chip(),
            DashboardAction::ResetFilters => app.reset_filters(),
            DashboardAction::ToggleConfig => app.toggle_config(),
            DashboardAction::ToggleHelp => app.toggle_help(),
            DashboardAction::None => {}
        }
    }

    /// Move every pending sync result into the view state
    pub fn drain_updates(&mut self, app: &mut DashboardApp) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.updates.try_recv() {
            if app.apply_update(update) {
                applied += 1;
            }
        }
        applied
    }

    fn persist_auto_refresh(&self, app: &mut DashboardApp, enabled: bool) {
        let Some(path) = &self.settings_file else {
            return;
        };
        if let Err(e) = Config::persist_auto_refresh_at(path, enabled) {
            warn!("Failed to save auto-refresh setting: {:#}", e);
            app.notify(Notification::warning("Could not save auto-refresh setting"));
        }
    }
}

/// Take over the terminal and run the dashboard until the user quits or
/// `shutdown` fires.
pub async fn run_dashboard(
    app: &mut DashboardApp,
    session: &mut DashboardSession,
    shutdown: &CancellationToken,
) -> CliResult<()> {
    debug!("Starting dashboard for {}", app.server_url);

    enable_raw_mode().map_err(|e| CliError::terminal("enable raw mode", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| CliError::terminal("enter alternate screen", e))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| CliError::terminal("create terminal", e))?;

    let result = run_dashboard_loop(&mut terminal, app, session, shutdown).await;

    // Restore the terminal even when the loop failed
    let restore = restore_terminal(&mut terminal);
    session.scheduler.stop();

    result.and(restore)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> CliResult<()> {
    disable_raw_mode().map_err(|e| CliError::terminal("disable raw mode", e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| CliError::terminal("leave alternate screen", e))?;
    terminal
        .show_cursor()
        .map_err(|e| CliError::terminal("show cursor", e))
}

async fn run_dashboard_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DashboardApp,
    session: &mut DashboardSession,
    shutdown: &CancellationToken,
) -> CliResult<()> {
    loop {
        terminal
            .draw(|f| render_ui(f, app))
            .map_err(|e| CliError::terminal("draw", e))?;

        let action = handle_input(INPUT_POLL, app.show_help)?;
        session.dispatch(app, action);

        session.drain_updates(app);
        app.expire_notices();

        if shutdown.is_cancelled() {
            debug!("Shutdown requested, closing dashboard");
            app.quit();
        }

        if app.should_quit {
            debug!("Dashboard quitting");
            break;
        }

        tokio::time::sleep(FRAME_DELAY).await;
    }

    Ok(())
}
