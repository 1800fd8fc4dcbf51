use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Gauge, Paragraph};

use super::app_state::TuiState;
use super::theme::Palette;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let palette = state.theme.palette();
    let session = state.session.state();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(palette.gauge).bg(palette.border))
        .ratio((session.progress / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{} / {}",
            session.current_index + 1,
            state.session.word_count()
        ));
    f.render_widget(gauge, rows[0]);

    let controls = Paragraph::new(control_line(state.is_flipped(), &palette))
        .alignment(Alignment::Center);
    f.render_widget(controls, rows[2]);

    // Flash message replaces the key hints
    let hint = match state.flash_message {
        Some(ref msg) => Line::from(Span::styled(
            msg.as_str(),
            Style::default().fg(palette.error),
        )),
        None => Line::from(Span::styled(
            "p: pronounce  t: theme  ?: help  q: quit",
            Style::default().fg(palette.muted),
        )),
    };
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Center), rows[4]);
}

fn button<'a>(key: &'a str, label: &'a str, color: Color) -> Vec<Span<'a>> {
    vec![
        Span::styled(format!("[{}] ", key), Style::default().fg(color)),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]
}

fn control_line(flipped: bool, palette: &Palette) -> Line<'static> {
    let gap = || Span::raw("     ");

    let spans: Vec<Span<'static>> = if flipped {
        let mut spans = button("1", "سخت بود", palette.hard);
        spans.push(gap());
        spans.extend(button("2", "خوب بود", palette.good));
        spans.push(gap());
        spans.extend(button("3", "آسان بود", palette.easy));
        spans
    } else {
        let mut spans = button("n", "رد کردن", palette.muted);
        spans.push(gap());
        spans.extend(button("space", "نمایش پاسخ", palette.accent));
        spans
    };

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::Theme;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_controls_follow_flip_state() {
        let palette = Theme::Dark.palette();

        let front = text(&control_line(false, &palette));
        assert!(front.contains("رد کردن"));
        assert!(front.contains("نمایش پاسخ"));
        assert!(!front.contains("سخت بود"));

        let back = text(&control_line(true, &palette));
        assert!(back.contains("[1] سخت بود"));
        assert!(back.contains("[2] خوب بود"));
        assert!(back.contains("[3] آسان بود"));
    }
}
