use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use flashtastic_lib::flashcards::LexicalRecord;

use super::app_state::TuiState;
use super::theme::Palette;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState, card: &LexicalRecord) {
    let palette = state.theme.palette();

    let (lines, alignment) = if state.is_flipped() {
        (back_lines(card, &palette), Alignment::Right)
    } else {
        (front_lines(card, &palette), Alignment::Left)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .padding(ratatui::widgets::Padding::horizontal(2));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(alignment)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

pub fn draw_error(f: &mut Frame, area: Rect, state: &TuiState, message: &str) {
    let palette = state.theme.palette();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.error));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn front_lines<'a>(card: &'a LexicalRecord, palette: &Palette) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            card.word.as_str(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(card.ipa.as_str(), Style::default().fg(palette.muted)),
            Span::styled("   \u{1f50a} p", Style::default().fg(palette.muted)),
        ]),
        Line::from(""),
        Line::from(card.english_definition.as_str()),
        Line::from(""),
    ];

    for example in &card.english_examples {
        lines.push(Line::from(Span::styled(
            format!("\"{}\"", example),
            Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
        )));
    }

    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled(
            "برای دیدن ترجمه کلیک کنید",
            Style::default().fg(palette.muted),
        ))
        .alignment(Alignment::Center),
    );

    lines
}

fn heading<'a>(title: &'a str, color: Color) -> Line<'a> {
    Line::from(Span::styled(
        title,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

/// Persian terms first, then English
fn term_list(persian: &[String], english: &[String]) -> String {
    persian
        .iter()
        .chain(english.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" \u{2022} ")
}

fn back_lines<'a>(card: &'a LexicalRecord, palette: &Palette) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            card.persian_translation.as_str(),
            Style::default().fg(palette.translation).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            card.persian_phonetic.as_str(),
            Style::default().fg(palette.muted),
        ))
        .alignment(Alignment::Center),
    ];

    if !card.persian_examples.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("مثال‌ها", palette.fg));
        for example in &card.persian_examples {
            lines.push(Line::from(example.as_str()));
        }
    }

    if card.has_synonyms() {
        lines.push(Line::from(""));
        lines.push(heading("مترادف‌ها", palette.fg));
        lines.push(Line::from(term_list(&card.persian_synonyms, &card.english_synonyms)));
    }

    if card.has_antonyms() {
        lines.push(Line::from(""));
        lines.push(heading("متضادها", palette.fg));
        lines.push(Line::from(term_list(&card.persian_antonyms, &card.english_antonyms)));
    }

    if let Some(ref note) = card.extra_note {
        lines.push(Line::from(""));
        lines.push(heading("نکته:", palette.note));
        lines.push(Line::from(Span::styled(
            note.as_str(),
            Style::default().fg(palette.note),
        )));
    }

    lines
}
