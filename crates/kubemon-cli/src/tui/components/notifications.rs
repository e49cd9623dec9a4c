use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::VecDeque;

use kubemon_client::{NoticeLevel, Notification};

const MAX_VISIBLE: usize = 3;

/// Stack the newest notifications in the top-right corner of `area`
pub fn render_notifications(f: &mut Frame, notices: &VecDeque<Notification>, area: Rect) {
    for (row, notice) in notices.iter().rev().take(MAX_VISIBLE).enumerate() {
        let text = format!(" {} {} ", icon(notice.level), notice.message);
        let width = (text.chars().count() as u16 + 2).min(area.width);
        let y = area.y + 1 + row as u16 * 3;
        if y + 3 > area.y + area.height {
            break;
        }

        let notice_area = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y,
            width,
            height: 3,
        };
        let color = color(notice.level);

        f.render_widget(Clear, notice_area);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color)))).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
            notice_area,
        );
    }
}

fn icon(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Success => "✓",
        NoticeLevel::Warning => "⚠",
        NoticeLevel::Error => "✗",
    }
}

fn color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Blue,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    }
}
