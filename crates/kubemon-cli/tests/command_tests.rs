mod common;

use common::{context_for, seeded, Backend, MockMonitor};
use kubemon_cli::commands::changes::ChangesArgs;
use kubemon_cli::commands::mark_all_read::MarkAllReadArgs;
use kubemon_cli::commands::mark_read::MarkReadArgs;
use kubemon_cli::commands::save::SaveArgs;
use kubemon_cli::commands::stats::StatsArgs;
use kubemon_cli::error::CliError;
use kubemon_cli::{execute, Commands};
use kubemon_client::{ReadStatus, SortOrder};

fn changes_args(status: ReadStatus, event_types: &[&str]) -> ChangesArgs {
    ChangesArgs {
        sort: SortOrder::Newest,
        status,
        event_types: event_types.iter().map(|s| s.to_string()).collect(),
        resource_types: vec![],
        format: None,
    }
}

#[tokio::test]
async fn test_changes_and_stats_succeed() {
    let monitor = MockMonitor::start(seeded()).await;
    let ctx = monitor.context();

    execute(
        &Commands::Changes(changes_args(ReadStatus::Unread, &["added"])),
        &ctx,
    )
    .await
    .unwrap();
    execute(&Commands::Stats(StatsArgs { format: None }), &ctx)
        .await
        .unwrap();

    // Read-only commands leave the backend alone
    assert_eq!(monitor.unread(), 2);
}

#[tokio::test]
async fn test_unknown_event_type_is_rejected_before_fetch() {
    let monitor = MockMonitor::start(seeded()).await;
    let err = execute(
        &Commands::Changes(changes_args(ReadStatus::All, &["PATCHED"])),
        &monitor.context(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.category(), "validation");
}

#[tokio::test]
async fn test_mark_read_and_mark_all_read() {
    let monitor = MockMonitor::start(seeded()).await;
    let ctx = monitor.context();

    execute(
        &Commands::MarkRead(MarkReadArgs {
            id: "d1".to_string(),
        }),
        &ctx,
    )
    .await
    .unwrap();
    assert_eq!(monitor.unread(), 1);

    execute(&Commands::MarkAllRead(MarkAllReadArgs {}), &ctx)
        .await
        .unwrap();
    assert_eq!(monitor.unread(), 0);
}

#[tokio::test]
async fn test_mark_read_unknown_id() {
    let monitor = MockMonitor::start(seeded()).await;
    let err = execute(
        &Commands::MarkRead(MarkReadArgs {
            id: "missing".to_string(),
        }),
        &monitor.context(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CliError::ChangeNotFound { ref id } if id == "missing"));
    assert_eq!(monitor.unread(), 2);
}

#[tokio::test]
async fn test_save_failure_carries_backend_reason() {
    let monitor = MockMonitor::start(Backend {
        save_error: Some("permission denied".to_string()),
        ..seeded()
    })
    .await;

    let err = execute(&Commands::Save(SaveArgs {}), &monitor.context())
        .await
        .unwrap_err();
    assert_eq!(err.category(), "rejected");
    assert!(err.to_string().contains("permission denied"));
    assert_eq!(monitor.state.lock().unwrap().saves, 1);
}

#[tokio::test]
async fn test_unreachable_backend() {
    // Nothing listens on port 9 locally
    let ctx = context_for("http://127.0.0.1:9");
    let err = execute(&Commands::Stats(StatsArgs { format: None }), &ctx)
        .await
        .unwrap_err();

    assert_eq!(err.category(), "connection");
    assert!(err.user_message().contains("kubemon --server"));
}

#[tokio::test]
async fn test_cancelled_before_completion() {
    let monitor = MockMonitor::start(seeded()).await;
    let ctx = monitor.context();
    ctx.shutdown_token.cancel();

    let err = execute(&Commands::Stats(StatsArgs { format: None }), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Cancelled));
}
