use clap::Parser;

use crate::error::CliResult;
use crate::output::ServerInfo;
use crate::CommandContext;

#[derive(Debug, Parser)]
pub struct ServerInfoArgs {
    /// Output format (compact, pretty, table, json, yaml)
    #[arg(short, long)]
    pub format: Option<String>,
}

pub async fn execute_async(args: &ServerInfoArgs, ctx: &CommandContext) -> CliResult<()> {
    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Contacting monitor...", ctx.json);
    let version = client
        .fetch_version()
        .await
        .map_err(|e| ctx.backend_error(e))?;
    spinner.finish();

    let info = ServerInfo {
        url: client.base_url().to_string(),
        version: version.display_version().to_string(),
    };
    ctx.output.output(&info, ctx.format(args.format.as_deref()))
}
