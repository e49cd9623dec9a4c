use anyhow::Result;
use std::fs::{self, OpenOptions};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` first, then the configured level for our crates.
fn build_filter(level: &str) -> Result<EnvFilter> {
    let level: tracing::Level = level.parse().unwrap_or(tracing::Level::WARN);
    let directives = format!(
        "{},kubemon_cli={},kubemon_client={}",
        tracing::Level::WARN.as_str(),
        level.as_str(),
        level.as_str()
    );

    Ok(EnvFilter::builder()
        .with_default_directive(level.into())
        .parse(std::env::var("RUST_LOG").unwrap_or(directives))?)
}

/// Install the global subscriber.
///
/// With `logging.file` set every event goes to that file. Otherwise events go
/// to stderr, unless `terminal_owned` says a full-screen UI is drawing there,
/// in which case nothing is written.
pub fn setup_logging(config: &LoggingConfig, verbose: bool, terminal_owned: bool) -> Result<()> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = build_filter(level)?;

    match &config.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            let file_layer = fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_thread_ids(config.structured)
                .with_line_number(config.structured)
                .with_file(config.structured)
                .with_target(true)
                .with_ansi(false)
                .with_filter(filter);

            tracing_subscriber::registry()
                .with(file_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
        }
        None if terminal_owned => {}
        None => {
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(config.structured)
                .with_thread_ids(config.structured)
                .with_filter(filter);

            tracing_subscriber::registry()
                .with(stderr_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_configured_level() {
        assert!(build_filter("debug").is_ok());
        // unknown levels fall back to warn
        assert!(build_filter("chatty").is_ok());
    }
}
