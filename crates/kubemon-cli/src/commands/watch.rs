use clap::Parser;
use kubemon_client::{MutationCoordinator, PollScheduler, Synchronizer};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::tui::{self, app::DashboardApp, DashboardSession};
use crate::CommandContext;

#[derive(Debug, Parser)]
pub struct WatchArgs {
    /// Poll period in milliseconds (overrides dashboard.poll_interval_ms)
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Start with auto-refresh paused
    #[arg(long)]
    pub no_auto_refresh: bool,
}

impl WatchArgs {
    pub fn poll_interval(&self, config: &Config) -> CliResult<Duration> {
        match self.interval_ms {
            Some(0) => Err(CliError::invalid_input(
                "interval-ms",
                "0",
                "Use a period of at least 1 millisecond",
            )),
            Some(ms) => Ok(Duration::from_millis(ms)),
            None => Ok(config.dashboard.poll_interval()),
        }
    }

    pub fn auto_refresh(&self, config: &Config) -> bool {
        !self.no_auto_refresh && config.dashboard.auto_refresh
    }
}

pub async fn execute_async(args: &WatchArgs, ctx: &CommandContext) -> CliResult<()> {
    let period = args.poll_interval(&ctx.config)?;
    let auto_refresh = args.auto_refresh(&ctx.config);
    debug!(
        "Opening dashboard for {} (poll every {}ms, auto-refresh {})",
        ctx.config.server.url,
        period.as_millis(),
        auto_refresh
    );

    let client = ctx.client()?;
    let (sync, updates) = Synchronizer::new(client);

    let loader = sync.clone();
    tokio::spawn(async move { loader.load_initial().await });
    let versioner = sync.clone();
    tokio::spawn(async move { versioner.load_version().await });

    let mut session = DashboardSession {
        coordinator: MutationCoordinator::new(sync.clone()),
        scheduler: PollScheduler::for_synchronizer(period, sync),
        updates,
        settings_file: Config::config_file().ok(),
    };
    if auto_refresh {
        session.scheduler.start();
    }

    let mut app = DashboardApp::new(ctx.config.server.url.clone(), auto_refresh);
    tui::run_dashboard(&mut app, &mut session, &ctx.shutdown_token).await?;

    info!("Dashboard closed");
    Ok(())
}
