use clap::Parser;
use tracing::debug;

use crate::error::CliResult;
use crate::output::StatsReport;
use crate::CommandContext;

#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Output format (compact, pretty, table, json, yaml)
    #[arg(short, long)]
    pub format: Option<String>,
}

pub async fn execute_async(args: &StatsArgs, ctx: &CommandContext) -> CliResult<()> {
    debug!("Fetching stats from {}", ctx.config.server.url);

    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Fetching statistics...", ctx.json);
    let stats = client
        .fetch_stats()
        .await
        .map_err(|e| ctx.backend_error(e))?;
    spinner.finish();

    ctx.output
        .output(&StatsReport(stats), ctx.format(args.format.as_deref()))
}
