use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::input::HELP_TEXT;

pub fn render_help_modal(f: &mut Frame, area: Rect) {
    // 70% of the screen, centered
    let modal_width = (area.width as f32 * 0.7) as u16;
    let modal_height = (area.height as f32 * 0.8) as u16;

    let modal_area = Rect {
        x: area.x + (area.width.saturating_sub(modal_width)) / 2,
        y: area.y + (area.height.saturating_sub(modal_height)) / 2,
        width: modal_width,
        height: modal_height,
    };

    f.render_widget(Clear, modal_area);

    let help_lines: Vec<Line> = HELP_TEXT
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                Line::from("")
            } else if line.ends_with("Controls") {
                Line::from(Span::styled(
                    line,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else if line.ends_with(':') {
                Line::from(Span::styled(
                    line,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
            } else if let Some((keys, description)) = line.trim().split_once(' ') {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        keys,
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!(" {}", description), Style::default().fg(Color::White)),
                ])
            } else {
                Line::from(Span::styled(line, Style::default().fg(Color::White)))
            }
        })
        .collect();

    let help_block = Block::default()
        .title(" Help - Press h/Esc to close ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(help_lines)
        .block(help_block)
        .wrap(Wrap { trim: false });

    f.render_widget(help_paragraph, modal_area);
}
