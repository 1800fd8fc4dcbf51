use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let palette = state.theme.palette();
    let tally = state.session.state().ratings;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(12), Constraint::Length(34)])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            " Flashtastic",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
    ]);
    f.render_widget(title, chunks[0]);

    let status = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", tally.hard), Style::default().fg(palette.hard)),
            Span::styled(format!("{} ", tally.good), Style::default().fg(palette.good)),
            Span::styled(format!("{}", tally.easy), Style::default().fg(palette.easy)),
            Span::styled(
                format!("   [t] {} ", state.theme.toggle_label()),
                Style::default().fg(palette.muted),
            ),
        ]),
    ])
    .alignment(Alignment::Right);
    f.render_widget(status, chunks[1]);
}
