use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use kubemon_cli::{config::Config, logging, run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    });

    // Initialize logging
    if let Err(e) =
        logging::setup_logging(&config.logging, cli.verbose, cli.command.owns_terminal())
    {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    // Setup graceful shutdown handling
    let shutdown_token = CancellationToken::new();
    let token = shutdown_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    run(cli, config, shutdown_token).await
}
