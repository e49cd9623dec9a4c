use serde::Serialize;

use kubemon_client::{ChangeEvent, ConfigSnapshot, FilteredChanges, StatsSnapshot};

use crate::error::CliResult;
use crate::output::{truncate, OutputFormat, OutputManager};
use crate::utils::formatting::{
    format_datetime, format_key_value, format_section, format_time, format_uptime,
};

/// Filtered change list formatter
#[derive(Debug, Serialize)]
pub struct ChangeList {
    pub changes: Vec<ChangeEvent>,
    /// Size of the full log
    pub total: usize,
    /// Changes that passed the filters, before the display cap
    pub matched: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl ChangeList {
    pub fn from_filtered(filtered: &FilteredChanges<'_>) -> Self {
        Self {
            changes: filtered.rows.iter().map(|c| (*c).clone()).collect(),
            total: filtered.total,
            matched: filtered.matched,
            placeholder: filtered
                .placeholder()
                .map(|p| format!("{}: {}", p.title(), p.message())),
        }
    }

    fn footer(&self, output: &OutputManager) {
        if self.matched > self.changes.len() {
            println!(
                "{}",
                output.theme().muted().apply_to(format!(
                    "Showing {} of {} matching changes ({} total)",
                    self.changes.len(),
                    self.matched,
                    self.total
                ))
            );
        }
    }

    fn time_column(&self, output: &OutputManager, change: &ChangeEvent) -> String {
        if output.config().timestamps {
            format_time(&change.timestamp)
        } else {
            String::new()
        }
    }
}

impl OutputFormat for ChangeList {
    fn format_compact(&self, output: &OutputManager) -> CliResult<()> {
        if let Some(placeholder) = &self.placeholder {
            output.info(placeholder)?;
            return Ok(());
        }

        let theme = output.theme();
        for change in &self.changes {
            let time = self.time_column(output, change);
            println!(
                "{} {}{:<8} {}/{}/{}",
                theme.unread_marker(change.is_read),
                if time.is_empty() {
                    String::new()
                } else {
                    format!("{} ", theme.muted().apply_to(time))
                },
                theme.event_type(&change.event_type).apply_to(&change.event_type),
                change.resource_type,
                change.namespace_or_default(),
                theme.accent().apply_to(&change.name),
            );
        }
        self.footer(output);
        Ok(())
    }

    fn format_pretty(&self, output: &OutputManager) -> CliResult<()> {
        if let Some(placeholder) = &self.placeholder {
            output.info(placeholder)?;
            return Ok(());
        }

        let theme = output.theme();
        println!(
            "{}",
            format_section(&format!("Changes ({}/{})", self.matched, self.total))
        );
        for change in &self.changes {
            println!();
            println!(
                "{} {} {}",
                theme.unread_marker(change.is_read),
                theme.event_type(&change.event_type).apply_to(&change.event_type),
                theme.highlight().apply_to(&change.name),
            );
            println!("  {}", format_key_value("ID", change.id.as_str()));
            println!("  {}", format_key_value("Resource", &change.resource_type));
            println!(
                "  {}",
                format_key_value("Namespace", change.namespace_or_default())
            );
            if output.config().timestamps {
                println!(
                    "  {}",
                    format_key_value("Time", &format_datetime(&change.timestamp))
                );
            }
            if !change.details.is_empty() {
                println!("  {}", theme.muted().apply_to(&change.details));
            }
        }
        println!();
        self.footer(output);
        Ok(())
    }

    fn format_table(&self, output: &OutputManager) -> CliResult<()> {
        if let Some(placeholder) = &self.placeholder {
            output.info(placeholder)?;
            return Ok(());
        }

        let headers = ["", "Time", "Event", "Resource", "Namespace", "Name", "Details", "ID"];
        let rows: Vec<Vec<String>> = self
            .changes
            .iter()
            .map(|change| {
                vec![
                    if change.is_read { " " } else { "●" }.to_string(),
                    self.time_column(output, change),
                    change.event_type.clone(),
                    change.resource_type.clone(),
                    change.namespace_or_default().to_string(),
                    change.name.clone(),
                    truncate(&change.details, 48),
                    change.id.to_string(),
                ]
            })
            .collect();
        output.table(&headers, &rows)?;
        self.footer(output);
        Ok(())
    }
}

/// Backend statistics formatter
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct StatsReport(pub StatsSnapshot);

impl StatsReport {
    fn summary_rows(&self) -> Vec<Vec<String>> {
        let stats = &self.0;
        let mut rows = vec![
            vec!["Total Changes".to_string(), stats.total_changes.to_string()],
            vec!["Unread".to_string(), stats.unread_changes.to_string()],
            vec!["This Session".to_string(), stats.current_session.to_string()],
            vec!["Loaded From File".to_string(), stats.loaded_from_file.to_string()],
            vec!["Uptime".to_string(), format_uptime(&stats.uptime)],
        ];
        if let Some(start) = &stats.start_time {
            rows.push(vec!["Started".to_string(), format_datetime(start)]);
        }
        rows
    }
}

impl OutputFormat for StatsReport {
    fn format_compact(&self, output: &OutputManager) -> CliResult<()> {
        let stats = &self.0;
        println!(
            "{} total, {} unread, {} this session, up {}",
            output.theme().highlight().apply_to(stats.total_changes),
            output.theme().unread.apply_to(stats.unread_changes),
            stats.current_session,
            format_uptime(&stats.uptime),
        );
        Ok(())
    }

    fn format_pretty(&self, output: &OutputManager) -> CliResult<()> {
        println!("{}", format_section("Statistics"));
        for row in self.summary_rows() {
            println!("{}", format_key_value(&row[0], &row[1]));
        }

        for (title, counts) in [
            ("By Event Type", &self.0.event_counts),
            ("By Resource", &self.0.resource_counts),
        ] {
            if counts.is_empty() {
                continue;
            }
            println!("{}", format_section(title));
            for (key, count) in counts {
                println!(
                    "{}",
                    format_key_value(key, &output.theme().accent().apply_to(count).to_string())
                );
            }
        }
        Ok(())
    }

    fn format_table(&self, output: &OutputManager) -> CliResult<()> {
        let mut rows = self.summary_rows();
        for (key, count) in &self.0.event_counts {
            rows.push(vec![format!("Events: {}", key), count.to_string()]);
        }
        for (key, count) in &self.0.resource_counts {
            rows.push(vec![format!("Resource: {}", key), count.to_string()]);
        }
        output.table(&["Metric", "Value"], &rows)
    }
}

/// Backend watch configuration formatter
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConfigReport(pub ConfigSnapshot);

impl OutputFormat for ConfigReport {
    fn format_compact(&self, output: &OutputManager) -> CliResult<()> {
        let enabled = self.0.enabled_resources();
        println!(
            "Watching {} of {} resources: {}",
            enabled.len(),
            self.0.resources.len(),
            output.theme().accent().apply_to(enabled.join(", "))
        );
        let persistence = &self.0.persistence;
        if persistence.enabled {
            println!("Persisting to {}", persistence.file_path);
        }
        Ok(())
    }

    fn format_pretty(&self, output: &OutputManager) -> CliResult<()> {
        let theme = output.theme();
        println!("{}", format_section("Watched Resources"));
        for resource in &self.0.resources {
            let marker = if resource.enabled {
                theme.success_icon()
            } else {
                theme.muted().apply_to("·")
            };
            let mut line = format!("{} {}", marker, theme.highlight().apply_to(&resource.name));
            if let Some(ns) = &resource.namespace {
                line.push_str(&format!(" ({})", ns));
            }
            if !resource.description.is_empty() {
                line.push_str(&format!(" {}", theme.muted().apply_to(&resource.description)));
            }
            println!("{}", line);
        }

        let persistence = &self.0.persistence;
        println!("{}", format_section("Persistence"));
        println!("{}", format_key_value("Enabled", &persistence.enabled.to_string()));
        println!("{}", format_key_value("File", &persistence.file_path));
        println!("{}", format_key_value("Auto Save", &persistence.auto_save.to_string()));
        println!(
            "{}",
            format_key_value("Save Interval", &format!("{}s", persistence.save_interval))
        );
        Ok(())
    }

    fn format_table(&self, output: &OutputManager) -> CliResult<()> {
        let rows: Vec<Vec<String>> = self
            .0
            .resources
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    if r.enabled { "yes" } else { "no" }.to_string(),
                    r.namespace.clone().unwrap_or_else(|| "all".to_string()),
                    r.description.clone(),
                ]
            })
            .collect();
        output.table(&["Resource", "Enabled", "Namespace", "Description"], &rows)
    }
}

/// Backend address and version formatter
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub url: String,
    pub version: String,
}

impl OutputFormat for ServerInfo {
    fn format_compact(&self, output: &OutputManager) -> CliResult<()> {
        println!(
            "{} {}",
            self.url,
            output.theme().accent().apply_to(format!("v{}", self.version))
        );
        Ok(())
    }

    fn format_pretty(&self, _output: &OutputManager) -> CliResult<()> {
        println!("{}", format_section("Change Monitor"));
        println!("{}", format_key_value("URL", &self.url));
        println!("{}", format_key_value("Version", &self.version));
        Ok(())
    }

    fn format_table(&self, output: &OutputManager) -> CliResult<()> {
        output.table(
            &["Property", "Value"],
            &[
                vec!["URL".to_string(), self.url.clone()],
                vec!["Version".to_string(), self.version.clone()],
            ],
        )
    }
}

/// Outcome of a mutating command
#[derive(Debug, Serialize)]
pub struct ActionResult {
    pub action: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    pub message: String,
}

impl ActionResult {
    pub fn new(action: &str, message: impl Into<String>) -> Self {
        Self {
            action: action.to_string(),
            success: true,
            count: None,
            message: message.into(),
        }
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

impl OutputFormat for ActionResult {
    fn format_compact(&self, output: &OutputManager) -> CliResult<()> {
        if self.success {
            output.success(&self.message)
        } else {
            output.error(&self.message)
        }
    }

    fn format_pretty(&self, output: &OutputManager) -> CliResult<()> {
        self.format_compact(output)
    }

    fn format_table(&self, output: &OutputManager) -> CliResult<()> {
        let mut rows = vec![
            vec!["Action".to_string(), self.action.clone()],
            vec!["Success".to_string(), self.success.to_string()],
        ];
        if let Some(count) = self.count {
            rows.push(vec!["Count".to_string(), count.to_string()]);
        }
        rows.push(vec!["Message".to_string(), self.message.clone()]);
        output.table(&["Property", "Value"], &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kubemon_client::{pipeline, ChangeId, FilterState, ReadStatus};
    use pretty_assertions::assert_eq;

    fn change(id: &str, ts: i64, is_read: bool) -> ChangeEvent {
        ChangeEvent {
            id: ChangeId::new(id),
            timestamp: Utc.timestamp_opt(ts, 0).unwrap(),
            event_type: "MODIFIED".to_string(),
            resource_type: "deployments".to_string(),
            namespace: None,
            name: id.to_string(),
            details: String::new(),
            is_read,
        }
    }

    #[test]
    fn test_change_list_from_filtered() {
        let changes = vec![change("a", 1, false), change("b", 2, true)];
        let filter = FilterState {
            read_status: ReadStatus::Unread,
            ..FilterState::default()
        };
        let list = ChangeList::from_filtered(&pipeline::apply(&changes, &filter));

        assert_eq!(list.total, 2);
        assert_eq!(list.matched, 1);
        assert_eq!(list.changes[0].id.as_str(), "a");
        assert_eq!(list.placeholder, None);
    }

    #[test]
    fn test_change_list_placeholder() {
        let list = ChangeList::from_filtered(&pipeline::apply(&[], &FilterState::default()));
        assert_eq!(
            list.placeholder.as_deref(),
            Some("Ready to Monitor: No changes detected yet...")
        );

        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["total"], 0);
        assert!(json["changes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_stats_report_serializes_backend_shape() {
        let report = StatsReport(StatsSnapshot {
            total_changes: 4,
            unread_changes: 1,
            uptime: "5m2s".to_string(),
            ..StatsSnapshot::default()
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalChanges"], 4);
        assert_eq!(json["unreadChanges"], 1);

        let rows = report.summary_rows();
        assert_eq!(rows[4], vec!["Uptime".to_string(), "5m".to_string()]);
    }

    #[test]
    fn test_action_result_json_omits_missing_count() {
        let json = serde_json::to_value(ActionResult::new("save", "Saved")).unwrap();
        assert!(json.get("count").is_none());

        let json =
            serde_json::to_value(ActionResult::new("mark-all-read", "Marked").with_count(3))
                .unwrap();
        assert_eq!(json["count"], 3);
    }
}
