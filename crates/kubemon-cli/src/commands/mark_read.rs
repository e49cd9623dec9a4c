use clap::Parser;
use tracing::debug;

use kubemon_client::ChangeId;

use crate::error::{CliError, CliResult};
use crate::output::ActionResult;
use crate::CommandContext;

#[derive(Debug, Parser)]
pub struct MarkReadArgs {
    /// ID of the change to mark as read
    #[arg(required = true)]
    pub id: String,
}

pub async fn execute_async(args: &MarkReadArgs, ctx: &CommandContext) -> CliResult<()> {
    let id = ChangeId::new(args.id.trim());
    if id.as_str().is_empty() {
        return Err(CliError::invalid_input(
            "change id",
            &args.id,
            "Pass the ID shown by: kubemon changes --format table",
        ));
    }
    debug!("Marking change {} as read", id);

    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Marking change as read...", ctx.json);
    let marked = client
        .mark_read(&id)
        .await
        .map_err(|e| ctx.backend_error(e))?;
    spinner.finish();

    if !marked {
        return Err(CliError::change_not_found(id.as_str()));
    }

    let result = ActionResult::new("mark-read", format!("Marked change {} as read", id));
    ctx.output.output(&result, ctx.format(None))
}

