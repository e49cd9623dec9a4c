use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::{
    app::DashboardApp,
    components::{
        render_change_list, render_config_panel, render_filter_bar, render_help_modal,
        render_notifications, render_stats_panel,
    },
};

pub fn render_ui(f: &mut Frame, app: &mut DashboardApp) {
    let size = f.size();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Stats
            Constraint::Length(4), // Filters
            Constraint::Min(5),    // Changes
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    render_title_bar(f, app, main_chunks[0]);

    render_stats_panel(f, app.dashboard.stats(), main_chunks[1]);
    render_filter_bar(f, app, main_chunks[2]);

    let list_area = if app.show_config {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[3]);
        render_config_panel(f, app.dashboard.config(), content_chunks[1]);
        content_chunks[0]
    } else {
        main_chunks[3]
    };
    render_change_list(f, app, list_area);

    render_status_bar(f, app, main_chunks[4]);

    render_notifications(f, app.dashboard.view().notices, list_area);

    if app.show_help {
        render_help_modal(f, size);
    }
}

fn render_title_bar(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let view = app.dashboard.view();

    let mut title_parts = vec![
        Span::styled(
            " Kubernetes Change Monitor ",
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("v{} ", view.version),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("- {} ", app.server_url),
            Style::default().fg(Color::Gray),
        ),
    ];

    if app.auto_refresh {
        title_parts.push(Span::styled("[LIVE] ", Style::default().fg(Color::Green)));
    } else {
        title_parts.push(Span::styled("[PAUSED] ", Style::default().fg(Color::Red)));
    }

    let title_paragraph = Paragraph::new(Line::from(title_parts)).style(
        Style::default()
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    );

    f.render_widget(title_paragraph, area);
}

fn render_status_bar(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let filters = app.dashboard.filters();
    let mut status_parts = vec![Span::styled(
        format!(
            " {} | {} ",
            filters.sort_order(),
            filters.read_status()
        ),
        Style::default().fg(Color::White),
    )];

    if filters.state().is_restrictive() {
        status_parts.push(Span::styled(
            "| filtered ",
            Style::default().fg(Color::Yellow),
        ));
    }

    let controls = " [q]uit [h]elp [a]uto [r]efresh [m]ark [M]ark all [S]ave ";
    let used: usize = status_parts.iter().map(|s| s.content.chars().count()).sum();
    let spacer_width = (area.width as usize)
        .saturating_sub(controls.chars().count())
        .saturating_sub(used);
    if spacer_width > 0 {
        status_parts.push(Span::raw(" ".repeat(spacer_width)));
    }
    status_parts.push(Span::styled(controls, Style::default().fg(Color::Gray)));

    let status_paragraph =
        Paragraph::new(Line::from(status_parts)).style(Style::default().bg(Color::DarkGray));

    f.render_widget(status_paragraph, area);
}
