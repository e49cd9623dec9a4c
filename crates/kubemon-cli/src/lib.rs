pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod tui;
pub mod utils;

use clap::{Parser, Subcommand};
use kubemon_client::MonitorClient;
use tokio_util::sync::CancellationToken;

use error::{CliError, CliResult};

/// kubemon - watch Kubernetes resource changes recorded by the change monitor
#[derive(Debug, Parser)]
#[command(name = "kubemon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Turn on verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Display output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the change monitor (overrides server.url)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the live change dashboard
    #[command(name = "watch")]
    Watch(commands::watch::WatchArgs),

    /// List recorded changes
    #[command(name = "changes")]
    Changes(commands::changes::ChangesArgs),

    /// Show change statistics
    #[command(name = "stats")]
    Stats(commands::stats::StatsArgs),

    /// Show which resources the monitor watches
    #[command(name = "config")]
    Config(commands::config::ConfigArgs),

    /// Show the monitor address and version
    #[command(name = "server-info")]
    ServerInfo(commands::server_info::ServerInfoArgs),

    /// Mark one change as read
    #[command(name = "mark-read")]
    MarkRead(commands::mark_read::MarkReadArgs),

    /// Mark every change as read
    #[command(name = "mark-all-read")]
    MarkAllRead(commands::mark_all_read::MarkAllReadArgs),

    /// Ask the monitor to write its change log to disk now
    #[command(name = "save")]
    Save(commands::save::SaveArgs),

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion(commands::completion::CompletionArgs),
}

impl Commands {
    /// Whether the command takes over the terminal
    pub fn owns_terminal(&self) -> bool {
        matches!(self, Commands::Watch(_))
    }
}

/// Run the kubemon CLI with cancellation support
pub async fn run(
    cli: Cli,
    mut config: config::Config,
    shutdown_token: CancellationToken,
) -> anyhow::Result<()> {
    if let Some(url) = &cli.server {
        config.server.url = url.clone();
    }

    let output = output::OutputManager::new(config.output.clone());

    let ctx = CommandContext {
        config,
        output,
        verbose: cli.verbose,
        json: cli.json,
        shutdown_token: shutdown_token.clone(),
    };

    match execute(&cli.command, &ctx).await {
        Ok(()) => Ok(()),
        Err(CliError::Cancelled) => {
            ctx.output.warning("Operation cancelled")?;
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Command failed ({}): {:?}", e.category(), e);
            ctx.output.error(&e.user_message())?;
            if ctx.verbose {
                eprintln!("\nDebug info: {:?}", e);
            }
            std::process::exit(1);
        }
    }
}

/// Dispatch one command, racing it against cancellation
pub async fn execute(command: &Commands, ctx: &CommandContext) -> CliResult<()> {
    // The dashboard watches the token itself so it can restore the terminal
    if let Commands::Watch(args) = command {
        return commands::watch::execute_async(args, ctx).await;
    }

    let command_future = async {
        match command {
            Commands::Watch(_) => Ok(()),
            Commands::Changes(args) => commands::changes::execute_async(args, ctx).await,
            Commands::Stats(args) => commands::stats::execute_async(args, ctx).await,
            Commands::Config(args) => commands::config::execute_async(args, ctx).await,
            Commands::ServerInfo(args) => commands::server_info::execute_async(args, ctx).await,
            Commands::MarkRead(args) => commands::mark_read::execute_async(args, ctx).await,
            Commands::MarkAllRead(args) => {
                commands::mark_all_read::execute_async(args, ctx).await
            }
            Commands::Save(args) => commands::save::execute_async(args, ctx).await,
            Commands::Completion(args) => commands::completion::execute_async(args, ctx).await,
        }
    };

    tokio::select! {
        result = command_future => result,
        _ = ctx.shutdown_token.cancelled() => Err(CliError::Cancelled),
    }
}

/// Shared context for command execution
pub struct CommandContext {
    pub config: config::Config,
    pub output: output::OutputManager,
    pub verbose: bool,
    pub json: bool,
    pub shutdown_token: CancellationToken,
}

impl CommandContext {
    /// Build a client for the configured backend
    pub fn client(&self) -> CliResult<MonitorClient> {
        Ok(MonitorClient::new(
            &self.config.server.url,
            self.config.server.timeout(),
        )?)
    }

    /// Map a client error, attaching the backend URL to connection failures
    pub fn backend_error(&self, error: kubemon_client::ClientError) -> CliError {
        CliError::from_client(&self.config.server.url, error)
    }

    /// Output format for this invocation: `--json` wins over `--format`
    pub fn format<'a>(&self, requested: Option<&'a str>) -> Option<&'a str> {
        if self.json {
            Some("json")
        } else {
            requested
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "kubemon",
            "changes",
            "--status",
            "unread",
            "--json",
            "--server",
            "http://10.0.0.5:8080",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.server.as_deref(), Some("http://10.0.0.5:8080"));
        assert!(matches!(cli.command, Commands::Changes(_)));
        assert!(!cli.command.owns_terminal());
    }

    #[test]
    fn test_watch_owns_terminal() {
        let cli = Cli::try_parse_from(["kubemon", "watch", "--interval-ms", "500"]).unwrap();
        assert!(cli.command.owns_terminal());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
