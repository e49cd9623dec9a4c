use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use kubemon_client::{ChangeEvent, ListContent};

use crate::tui::app::DashboardApp;
use crate::utils::formatting::format_time;

/// Draw the change list.
///
/// Takes the app mutably so the scroll offset in `list_state` survives
/// between frames and `page_size` tracks the visible height.
pub fn render_change_list(f: &mut Frame, app: &mut DashboardApp, area: Rect) {
    app.page_size = area.height.saturating_sub(2).max(1) as usize;
    let view = app.dashboard.view();

    let title = match &view.list {
        ListContent::Rows(filtered) if filtered.is_truncated() => format!(
            " Changes ({} of {} matching, {} total) ",
            filtered.rows.len(),
            filtered.matched,
            filtered.total
        ),
        ListContent::Rows(filtered) => {
            format!(" Changes ({}/{}) ", filtered.matched, filtered.total)
        }
        _ => " Changes ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if app.show_help {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::Blue)
        });

    match &view.list {
        ListContent::Rows(filtered) => {
            let items: Vec<ListItem> = filtered
                .rows
                .iter()
                .map(|change| create_change_list_item(change))
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("▶ ");

            f.render_stateful_widget(list, area, &mut app.list_state);
        }
        ListContent::Loading => {
            render_empty_state(f, block, area, "Loading changes...", "", Color::Gray)
        }
        ListContent::Empty(placeholder) => render_empty_state(
            f,
            block,
            area,
            placeholder.title(),
            placeholder.message(),
            Color::Gray,
        ),
        ListContent::Unavailable(reason) => render_empty_state(
            f,
            block,
            area,
            "Error loading changes",
            reason,
            Color::Red,
        ),
    }
}

fn render_empty_state(
    f: &mut Frame,
    block: Block<'_>,
    area: Rect,
    title: &str,
    message: &str,
    color: Color,
) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn create_change_list_item(change: &ChangeEvent) -> ListItem<'static> {
    let event_color = event_color(&change.event_type);
    let (marker, name_style) = if change.is_read {
        (" ", Style::default().fg(Color::Gray))
    } else {
        (
            "●",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    };

    let mut spans = vec![
        Span::styled(format!("{} ", marker), Style::default().fg(Color::Magenta)),
        Span::styled(
            format!("{} ", format_time(&change.timestamp)),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("{:<8} ", change.event_type),
            Style::default().fg(event_color),
        ),
        Span::styled(
            format!("{:<12} ", change.resource_type),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{}/", change.namespace_or_default()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(change.name.clone(), name_style),
    ];

    if !change.details.is_empty() {
        let details: String = if change.details.chars().count() > 60 {
            let mut cut: String = change.details.chars().take(57).collect();
            cut.push_str("...");
            cut
        } else {
            change.details.clone()
        };
        spans.push(Span::styled(
            format!("  {}", details),
            Style::default().fg(Color::DarkGray),
        ));
    }

    ListItem::new(Line::from(spans))
}

fn event_color(event_type: &str) -> Color {
    match event_type {
        "ADDED" => Color::Green,
        "MODIFIED" => Color::Yellow,
        "DELETED" => Color::Red,
        _ => Color::White,
    }
}
