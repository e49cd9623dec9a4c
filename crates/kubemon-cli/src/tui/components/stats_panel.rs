use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use kubemon_client::StatsSnapshot;

use crate::utils::formatting::format_uptime;

pub fn render_stats_panel(f: &mut Frame, stats: Option<&StatsSnapshot>, area: Rect) {
    let block = Block::default()
        .title(" Statistics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let line = match stats {
        Some(stats) => {
            let unread_color = if stats.unread_changes > 0 {
                Color::Magenta
            } else {
                Color::Green
            };
            Line::from(vec![
                label("Total "),
                value(stats.total_changes.to_string(), Color::White),
                label("   Unread "),
                value(stats.unread_changes.to_string(), unread_color),
                label("   Session "),
                value(stats.current_session.to_string(), Color::Cyan),
                label("   Uptime "),
                value(format_uptime(&stats.uptime), Color::Green),
            ])
        }
        None => Line::from(Span::styled("Loading...", Style::default().fg(Color::Gray))),
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn label(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(Color::Gray))
}

fn value(text: String, color: Color) -> Span<'static> {
    Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
