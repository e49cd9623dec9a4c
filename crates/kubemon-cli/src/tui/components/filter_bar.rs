use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use kubemon_client::{FilterStore, MultiGroup, ReadStatus, SortOrder};

use crate::tui::app::DashboardApp;

pub fn render_filter_bar(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let filters = app.dashboard.filters();

    let block = Block::default()
        .title(" Filters [s]ort [u]status [1-3] events [←→ Space] resources [x] reset ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let lines = vec![
        selection_line(filters),
        resource_line(filters, app.chip_cursor),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn selection_line(filters: &FilterStore) -> Line<'static> {
    let mut spans = vec![Span::styled("Sort ", label())];
    for order in [SortOrder::Newest, SortOrder::Oldest] {
        spans.push(chip(order.as_str(), filters.sort_order() == order, false));
    }

    spans.push(Span::styled("  Status ", label()));
    for status in [ReadStatus::All, ReadStatus::Unread, ReadStatus::Read] {
        spans.push(chip(status.as_str(), filters.read_status() == status, false));
    }

    spans.push(Span::styled("  Events ", label()));
    for (i, event_type) in filters.event_type_universe().iter().enumerate() {
        let selected = filters.is_selected(MultiGroup::EventType, event_type);
        spans.push(chip(&format!("{}:{}", i + 1, event_type), selected, false));
    }

    Line::from(spans)
}

fn resource_line(filters: &FilterStore, cursor: usize) -> Line<'static> {
    let mut spans = vec![Span::styled("Resources ", label())];

    match filters.resource_universe() {
        None => spans.push(Span::styled("loading...", label())),
        Some([]) => spans.push(Span::styled("none enabled", label())),
        Some(chips) => {
            for (i, resource) in chips.iter().enumerate() {
                let selected = filters.is_selected(MultiGroup::ResourceType, resource);
                spans.push(chip(resource, selected, i == cursor));
            }
        }
    }

    Line::from(spans)
}

/// A filter chip; selected chips are filled, the focused chip is underlined
fn chip(text: &str, selected: bool, focused: bool) -> Span<'static> {
    let mut style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    if focused {
        style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
    }
    Span::styled(format!("[{}]", text), style)
}

fn label() -> Style {
    Style::default().fg(Color::Gray)
}
