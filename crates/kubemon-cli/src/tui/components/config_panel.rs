use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use kubemon_client::ConfigSnapshot;

/// Watched resources and persistence settings reported by the monitor
pub fn render_config_panel(f: &mut Frame, config: Option<&ConfigSnapshot>, area: Rect) {
    let block = Block::default()
        .title(" Watched Resources [c] ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let Some(config) = config else {
        let paragraph = Paragraph::new(Span::styled(
            "Configuration unavailable",
            Style::default().fg(Color::Gray),
        ))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let mut lines = Vec::new();
    for resource in &config.resources {
        let (symbol, color) = if resource.enabled {
            ("✓", Color::Green)
        } else {
            ("·", Color::DarkGray)
        };
        let mut spans = vec![
            Span::styled(format!("{} ", symbol), Style::default().fg(color)),
            Span::styled(
                resource.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(namespace) = &resource.namespace {
            spans.push(Span::styled(
                format!(" ({})", namespace),
                Style::default().fg(Color::Cyan),
            ));
        }
        lines.push(Line::from(spans));
        if !resource.description.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", resource.description),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    let persistence = &config.persistence;
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Persistence",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));
    if persistence.enabled {
        lines.push(Line::from(format!("  File: {}", persistence.file_path)));
        lines.push(Line::from(format!(
            "  Auto save: {} (every {}s)",
            if persistence.auto_save { "on" } else { "off" },
            persistence.save_interval
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  disabled",
            Style::default().fg(Color::Gray),
        )));
    }

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
