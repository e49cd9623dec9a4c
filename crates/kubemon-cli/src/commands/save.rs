use clap::Parser;

use kubemon_client::ClientError;

use crate::error::CliResult;
use crate::output::ActionResult;
use crate::CommandContext;

#[derive(Debug, Parser)]
pub struct SaveArgs {}

/// Ask the monitor to persist its change log immediately
pub async fn execute_async(_args: &SaveArgs, ctx: &CommandContext) -> CliResult<()> {
    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Saving change log...", ctx.json);
    let response = client.save_now().await.map_err(|e| ctx.backend_error(e))?;
    spinner.finish();

    if !response.success {
        let reason = response
            .error
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(ClientError::rejected("save-now", reason).into());
    }

    let result = ActionResult::new("save", "Changes saved to file successfully!");
    ctx.output.output(&result, ctx.format(None))
}
