use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use flashtastic_lib::session::CardPhase;

use super::app_state::TuiState;
use super::{card_widget, footer, header, loader};

/// Widest the card column gets on large terminals
const MAX_COLUMN_WIDTH: u16 = 76;

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();
    let palette = state.theme.palette();

    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        size,
    );

    let column = centered_column(size, MAX_COLUMN_WIDTH);

    // Main layout: header, card, footer
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(5),
        ])
        .split(column);

    header::draw(f, outer[0], state);

    let body = outer[1];
    state.card_area = None;
    match state.session.state().phase {
        CardPhase::Loading => loader::draw(f, body, state),
        CardPhase::Error { ref message } => card_widget::draw_error(f, body, state, message),
        CardPhase::Ready => {
            if let Some(card) = state.session.state().visible_card() {
                card_widget::draw(f, body, state, card);
            }
            // Save area for mouse hit-testing
            state.card_area = Some(body);
        }
        CardPhase::Idle => {}
    }

    footer::draw(f, outer[2], state);

    if state.show_help {
        draw_help(f, size, state);
    }
}

fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_help(f: &mut Frame, area: Rect, state: &TuiState) {
    let palette = state.theme.palette();
    let bindings = [
        ("Space / Enter", "flip the card"),
        ("n / \u{2192}", "skip to the next word"),
        ("1  2  3", "rate hard / good / easy"),
        ("p", "pronounce the word"),
        ("t", "toggle light / dark"),
        ("click", "flip the card"),
        ("q / Esc", "quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (keys, action) in bindings {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<15}", keys),
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(action),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  ? or Esc to close",
        Style::default().fg(palette.muted),
    )));

    let popup = centered_rect(area, 50, lines.len() as u16 + 2);
    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.bg).fg(palette.fg));

    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block), popup);
}
