mod common;

use common::{seeded, MockMonitor};
use std::time::Duration;
use tempfile::TempDir;

use kubemon_cli::config::Config;
use kubemon_cli::tui::app::DashboardApp;
use kubemon_cli::tui::input::DashboardAction;
use kubemon_cli::tui::DashboardSession;
use kubemon_client::{
    ListContent, MonitorClient, MutationCoordinator, NoticeLevel, PollScheduler, Synchronizer,
};

struct Harness {
    monitor: MockMonitor,
    app: DashboardApp,
    session: DashboardSession,
    sync: Synchronizer,
    settings_dir: TempDir,
}

impl Harness {
    async fn start() -> Self {
        let monitor = MockMonitor::start(seeded()).await;
        let client = MonitorClient::new(&monitor.url(), Duration::from_secs(2)).unwrap();
        let (sync, updates) = Synchronizer::new(client);
        let settings = TempDir::new().unwrap();

        let session = DashboardSession {
            coordinator: MutationCoordinator::new(sync.clone()),
            scheduler: PollScheduler::for_synchronizer(Duration::from_secs(60), sync.clone()),
            updates,
            settings_file: Some(settings.path().join("config.toml")),
        };
        let mut harness = Self {
            app: DashboardApp::new(monitor.url(), false),
            monitor,
            session,
            sync,
            settings_dir: settings,
        };

        harness.sync.load_initial().await;
        harness.session.drain_updates(&mut harness.app);
        harness
    }

    /// Drain updates until `done` holds or a second passes
    async fn settle(&mut self, done: impl Fn(&DashboardApp) -> bool) {
        for _ in 0..50 {
            self.session.drain_updates(&mut self.app);
            if done(&self.app) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("dashboard did not reach the expected state");
    }
}

fn unread_rows(app: &DashboardApp) -> usize {
    match app.dashboard.view().list {
        ListContent::Rows(filtered) => filtered.rows.iter().filter(|c| !c.is_read).count(),
        _ => usize::MAX,
    }
}

fn notices(app: &DashboardApp) -> Vec<String> {
    app.dashboard
        .view()
        .notices
        .iter()
        .map(|n| n.message.clone())
        .collect()
}

#[tokio::test]
async fn test_initial_load_selects_newest() {
    let harness = Harness::start().await;
    let selected = harness.app.selected_change().unwrap();
    assert_eq!(selected.id.as_str(), "d3");
    assert_eq!(unread_rows(&harness.app), 2);
}

#[tokio::test]
async fn test_mark_selected_skips_read_rows() {
    let mut harness = Harness::start().await;

    // d3 is already read
    harness
        .session
        .dispatch(&mut harness.app, DashboardAction::MarkSelectedRead);
    tokio::time::sleep(Duration::from_millis(100)).await;
    harness.session.drain_updates(&mut harness.app);
    assert_eq!(harness.monitor.unread(), 2);

    harness
        .session
        .dispatch(&mut harness.app, DashboardAction::NavigateDown);
    assert_eq!(harness.app.selected_change().unwrap().id.as_str(), "d2");
    harness
        .session
        .dispatch(&mut harness.app, DashboardAction::MarkSelectedRead);
    harness
        .settle(|app| {
            app.dashboard.stats().map(|s| s.unread_changes) == Some(1) && unread_rows(app) == 1
        })
        .await;
}

#[tokio::test]
async fn test_mark_all_read_reports_count() {
    let mut harness = Harness::start().await;
    harness
        .session
        .dispatch(&mut harness.app, DashboardAction::MarkAllRead);
    harness
        .settle(|app| notices(app).iter().any(|m| m == "Marked 2 changes as read"))
        .await;
    assert_eq!(unread_rows(&harness.app), 0);
}

#[tokio::test]
async fn test_save_now_notifies() {
    let mut harness = Harness::start().await;
    harness
        .session
        .dispatch(&mut harness.app, DashboardAction::SaveNow);
    harness
        .settle(|app| {
            notices(app)
                .iter()
                .any(|m| m == "Changes saved to file successfully!")
        })
        .await;
    assert_eq!(harness.monitor.state.lock().unwrap().saves, 1);
}

#[tokio::test]
async fn test_toggle_auto_refresh_persists_setting() {
    let mut harness = Harness::start().await;
    let settings = harness.session.settings_file.clone().unwrap();

    harness
        .session
        .dispatch(&mut harness.app, DashboardAction::ToggleAutoRefresh);
    assert!(harness.app.auto_refresh);
    assert!(harness.session.scheduler.is_polling());
    assert!(Config::load_from_file(&settings).unwrap().dashboard.auto_refresh);

    harness
        .session
        .dispatch(&mut harness.app, DashboardAction::ToggleAutoRefresh);
    assert!(!harness.app.auto_refresh);
    assert!(!harness.session.scheduler.is_polling());
    assert!(!Config::load_from_file(&settings).unwrap().dashboard.auto_refresh);
}

#[tokio::test]
async fn test_unwritable_settings_raise_a_warning() {
    let mut harness = Harness::start().await;
    // A directory cannot be read or written as a config file
    harness.session.settings_file = Some(harness.settings_dir.path().to_path_buf());

    harness
        .session
        .dispatch(&mut harness.app, DashboardAction::ToggleAutoRefresh);
    assert!(harness.app.auto_refresh);

    let view = harness.app.dashboard.view();
    let notice = view.notices.back().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.message, "Could not save auto-refresh setting");
}

#[tokio::test]
async fn test_filters_apply_locally() {
    let mut harness = Harness::start().await;
    harness
        .session
        .dispatch(&mut harness.app, DashboardAction::CycleStatus);
    match harness.app.dashboard.view().list {
        ListContent::Rows(filtered) => assert_eq!(filtered.rows.len(), 2),
        other => panic!("expected rows, got {:?}", other),
    }

    harness
        .session
        .dispatch(&mut harness.app, DashboardAction::Quit);
    assert!(harness.app.should_quit);
}
