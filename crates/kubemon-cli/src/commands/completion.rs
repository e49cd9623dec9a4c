use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::CommandContext;

#[derive(Debug, Parser)]
pub struct CompletionArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,
}

/// Generate shell completion scripts
pub async fn execute_async(args: &CompletionArgs, ctx: &CommandContext) -> CliResult<()> {
    debug!("Generating shell completion for: {:?}", args.shell);

    let mut app = crate::Cli::command();
    let app_name = app.get_name().to_string();

    match &args.output {
        Some(output_path) => {
            let mut file = std::fs::File::create(output_path).map_err(|e| {
                CliError::Internal(anyhow::anyhow!(
                    "Failed to create completion file {}: {}",
                    output_path.display(),
                    e
                ))
            })?;

            generate(args.shell, &mut app, &app_name, &mut file);

            ctx.output.success(&format!(
                "Shell completion for {} written to: {}",
                args.shell,
                output_path.display()
            ))?;
        }
        None => {
            generate(args.shell, &mut app, &app_name, &mut io::stdout());
        }
    }

    Ok(())
}
