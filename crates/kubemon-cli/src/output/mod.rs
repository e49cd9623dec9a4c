mod formatters;
mod progress;
mod theme;

pub use formatters::*;
pub use progress::*;
pub use theme::*;

use console::Term;

use crate::config::OutputConfig;
use crate::error::{CliError, CliResult};

/// Formats accepted by `--format` and `output.default_format`
pub const FORMATS: [&str; 5] = ["compact", "pretty", "table", "json", "yaml"];

/// Main output handler for the CLI
#[derive(Debug)]
pub struct OutputManager {
    config: OutputConfig,
    term: Term,
    theme: Theme,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Self {
        let term = Term::stdout();
        let theme = if config.colors && term.features().colors_supported() {
            Theme::colored()
        } else {
            Theme::plain()
        };

        Self {
            config,
            term,
            theme,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> CliResult<()> {
        println!("{} {}", self.theme.success_icon(), message);
        Ok(())
    }

    /// Print an error message
    pub fn error(&self, message: &str) -> CliResult<()> {
        eprintln!("{} {}", self.theme.error_icon(), message);
        Ok(())
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) -> CliResult<()> {
        println!("{} {}", self.theme.warning_icon(), message);
        Ok(())
    }

    /// Print an info message
    pub fn info(&self, message: &str) -> CliResult<()> {
        println!("{} {}", self.theme.info_icon(), message);
        Ok(())
    }

    /// Print formatted output based on the configured format
    pub fn output<T>(&self, data: &T, format: Option<&str>) -> CliResult<()>
    where
        T: serde::Serialize + OutputFormat,
    {
        let format = format.unwrap_or(&self.config.default_format);

        match format {
            "json" => {
                let json = serde_json::to_string_pretty(data)?;
                println!("{}", json);
            }
            "yaml" => {
                let yaml =
                    serde_yaml::to_string(data).map_err(|e| CliError::Internal(e.into()))?;
                println!("{}", yaml);
            }
            "compact" => data.format_compact(self)?,
            "pretty" => data.format_pretty(self)?,
            "table" => data.format_table(self)?,
            _ => {
                return Err(CliError::invalid_input(
                    "format",
                    format,
                    format!("Supported formats: {}", FORMATS.join(", ")),
                ));
            }
        }

        Ok(())
    }

    /// Spinner for a backend call; hidden for machine-readable output or
    /// when stdout is not a terminal
    pub fn spinner(&self, message: &str, json: bool) -> Spinner {
        if json || !self.term.is_term() {
            Spinner::hidden()
        } else {
            Spinner::new(message)
        }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Print a table with headers and rows
    pub fn table(&self, headers: &[&str], rows: &[Vec<String>]) -> CliResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        print!("{}", render_table(headers, rows, self.config.max_width, &self.theme));
        Ok(())
    }
}

/// Render a bordered table, shrinking columns proportionally to `max_width`
pub fn render_table(
    headers: &[&str],
    rows: &[Vec<String>],
    max_width: Option<usize>,
    theme: &Theme,
) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    if let Some(max_width) = max_width {
        // Account for separators
        let available_width = max_width.saturating_sub(widths.len() * 3 + 1);
        let total_width: usize = widths.iter().sum();
        if total_width > available_width {
            let scale = available_width as f64 / total_width as f64;
            for width in &mut widths {
                *width = ((*width as f64 * scale) as usize).max(1);
            }
        }
    }

    let mut out = String::new();

    out.push('│');
    for (header, width) in headers.iter().zip(&widths) {
        let cell = pad(&truncate(header, *width), *width);
        out.push_str(&format!(" {} │", theme.table_header().apply_to(cell)));
    }
    out.push('\n');

    out.push('├');
    for (i, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        out.push(if i + 1 == widths.len() { '┤' } else { '┼' });
    }
    out.push('\n');

    for row in rows {
        out.push('│');
        for (i, width) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            out.push_str(&format!(" {} │", pad(&truncate(cell, *width), *width)));
        }
        out.push('\n');
    }

    out
}

/// Shorten `text` to `width` characters, ending with an ellipsis when cut
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Trait for types that can be formatted in different ways
pub trait OutputFormat {
    fn format_compact(&self, output: &OutputManager) -> CliResult<()>;
    fn format_pretty(&self, output: &OutputManager) -> CliResult<()>;
    fn format_table(&self, output: &OutputManager) -> CliResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_manager_creation() {
        let config = OutputConfig {
            default_format: "json".to_string(),
            colors: true,
            timestamps: true,
            max_width: Some(100),
        };

        let output = OutputManager::new(config);
        assert_eq!(output.config().default_format, "json");
    }

    #[test]
    fn test_truncate_is_char_aware() {
        assert_eq!(truncate("pods", 10), "pods");
        assert_eq!(truncate("deployments", 6), "deplo…");
        assert_eq!(truncate("ñandú-über", 4), "ñan…");
    }

    #[test]
    fn test_render_table_respects_max_width() {
        let rows = vec![vec![
            "a-very-long-resource-name".to_string(),
            "ADDED".to_string(),
        ]];
        let table = render_table(&["Name", "Event"], &rows, Some(24), &Theme::plain());

        for line in table.lines() {
            assert!(line.chars().count() <= 24, "line too wide: {}", line);
        }
        assert!(table.contains('…'));
    }

    #[test]
    fn test_render_table_pads_columns() {
        let rows = vec![
            vec!["c1".to_string(), "pods".to_string()],
            vec!["c22".to_string(), "services".to_string()],
        ];
        let table = render_table(&["ID", "Resource"], &rows, None, &Theme::plain());
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines[0], "│ ID  │ Resource │");
        assert_eq!(lines[1], "├─────┼──────────┤");
        assert_eq!(lines[2], "│ c1  │ pods     │");
        assert_eq!(lines[3], "│ c22 │ services │");
    }
}
