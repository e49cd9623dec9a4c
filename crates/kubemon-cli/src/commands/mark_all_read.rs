use clap::Parser;
use tracing::debug;

use crate::error::CliResult;
use crate::output::ActionResult;
use crate::CommandContext;

#[derive(Debug, Parser)]
pub struct MarkAllReadArgs {}

pub async fn execute_async(_args: &MarkAllReadArgs, ctx: &CommandContext) -> CliResult<()> {
    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Marking all changes as read...", ctx.json);
    let count = client
        .mark_all_read()
        .await
        .map_err(|e| ctx.backend_error(e))?;
    spinner.finish();
    debug!("Backend marked {} changes", count);

    let result = ActionResult::new("mark-all-read", format!("Marked {} changes as read", count))
        .with_count(count);
    ctx.output.output(&result, ctx.format(None))
}
