use clap::Parser;
use tracing::debug;

use crate::error::CliResult;
use crate::output::ConfigReport;
use crate::CommandContext;

#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Output format (compact, pretty, table, json, yaml)
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Show the monitor's watch configuration (not the local CLI config)
pub async fn execute_async(args: &ConfigArgs, ctx: &CommandContext) -> CliResult<()> {
    debug!("Fetching backend config from {}", ctx.config.server.url);

    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Fetching configuration...", ctx.json);
    let config = client
        .fetch_config()
        .await
        .map_err(|e| ctx.backend_error(e))?;
    spinner.finish();

    ctx.output
        .output(&ConfigReport(config), ctx.format(args.format.as_deref()))
}
