use clap::Parser;
use tracing::debug;

use kubemon_client::models::EVENT_TYPES;
use kubemon_client::{pipeline, FilterStore, MultiGroup, ReadStatus, SingleSelection, SortOrder};

use crate::error::{CliError, CliResult};
use crate::output::ChangeList;
use crate::CommandContext;

#[derive(Debug, Parser)]
pub struct ChangesArgs {
    /// Sort order: newest or oldest
    #[arg(long, default_value_t = SortOrder::Newest)]
    pub sort: SortOrder,

    /// Read status: all, unread or read
    #[arg(long, default_value_t = ReadStatus::All)]
    pub status: ReadStatus,

    /// Only show these event types (ADDED, MODIFIED, DELETED); repeatable
    #[arg(short = 'e', long = "event-type", value_name = "TYPE")]
    pub event_types: Vec<String>,

    /// Only show these resource types (e.g. pods); repeatable
    #[arg(short = 'r', long = "resource-type", value_name = "RESOURCE")]
    pub resource_types: Vec<String>,

    /// Output format (compact, pretty, table, json, yaml)
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Turn the command-line selections into a filter store
pub fn build_filters(args: &ChangesArgs) -> CliResult<FilterStore> {
    let mut filters = FilterStore::new();
    filters.select_single(SingleSelection::Sort(args.sort));
    filters.select_single(SingleSelection::Status(args.status));

    for event_type in &args.event_types {
        let normalized = event_type.to_ascii_uppercase();
        if !EVENT_TYPES.contains(&normalized.as_str()) {
            return Err(CliError::invalid_input(
                "event type",
                event_type,
                format!("Supported event types: {}", EVENT_TYPES.join(", ")),
            ));
        }
        if !filters.is_selected(MultiGroup::EventType, &normalized) {
            filters.toggle_multi(MultiGroup::EventType, normalized);
        }
    }

    for resource_type in &args.resource_types {
        if !filters.is_selected(MultiGroup::ResourceType, resource_type) {
            filters.toggle_multi(MultiGroup::ResourceType, resource_type.as_str());
        }
    }

    Ok(filters)
}

pub async fn execute_async(args: &ChangesArgs, ctx: &CommandContext) -> CliResult<()> {
    let filters = build_filters(args)?;
    debug!("Listing changes with filters: {:?}", filters.state());

    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Fetching changes...", ctx.json);
    let changes = client
        .fetch_changes()
        .await
        .map_err(|e| ctx.backend_error(e))?;
    spinner.finish();

    let filtered = pipeline::apply(&changes, filters.state());
    debug!(
        "{} of {} changes match, showing {}",
        filtered.matched,
        filtered.total,
        filtered.rows.len()
    );

    let list = ChangeList::from_filtered(&filtered);
    ctx.output.output(&list, ctx.format(args.format.as_deref()))?;

    Ok(())
}
