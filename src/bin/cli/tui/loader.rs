use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::app_state::TuiState;

const SPINNER_FRAMES: [&str; 10] = [
    "\u{280b}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283c}",
    "\u{2834}", "\u{2826}", "\u{2827}", "\u{2807}", "\u{280f}",
];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let palette = state.theme.palette();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            spinner_frame(state.spinner_tick),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "در حال آماده‌سازی کارت بعدی...",
            Style::default().fg(palette.muted),
        )),
    ];

    let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
