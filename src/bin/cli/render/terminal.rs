use flashtastic_lib::flashcards::LexicalRecord;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

fn section(lines: &mut Vec<String>, title: &str, items: &[String], use_color: bool) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(paint(title, Color::BOLD, use_color));
    for item in items {
        lines.push(format!("  \u{2022} {}", item));
    }
}

/// Synonym/antonym line: Persian terms, then English terms
fn pair_line(persian: &[String], english: &[String]) -> String {
    let mut parts = Vec::new();
    if !persian.is_empty() {
        parts.push(persian.join("، "));
    }
    if !english.is_empty() {
        parts.push(english.join(", "));
    }
    parts.join(" | ")
}

/// Render both faces of a card as terminal text
pub fn render_card(card: &LexicalRecord, use_color: bool) -> String {
    let mut lines = Vec::new();

    // Front
    lines.push(format!(
        "{}  {}",
        paint(&card.word, Color::BOLD, use_color),
        paint(&card.ipa, Color::CYAN, use_color)
    ));
    lines.push(card.english_definition.clone());
    for example in &card.english_examples {
        lines.push(paint(&format!("  \"{}\"", example), Color::ITALIC, use_color));
    }

    lines.push(paint(&"\u{2500}".repeat(40), Color::GRAY, use_color));

    // Back
    lines.push(format!(
        "{}  {}",
        paint(&card.persian_translation, Color::BOLD, use_color),
        paint(&format!("[{}]", card.persian_phonetic), Color::DIM, use_color)
    ));

    section(&mut lines, "مثال‌ها", &card.persian_examples, use_color);

    if card.has_synonyms() {
        lines.push(String::new());
        lines.push(paint("مترادف‌ها", Color::GREEN, use_color));
        lines.push(format!(
            "  {}",
            pair_line(&card.persian_synonyms, &card.english_synonyms)
        ));
    }

    if card.has_antonyms() {
        lines.push(String::new());
        lines.push(paint("متضادها", Color::RED, use_color));
        lines.push(format!(
            "  {}",
            pair_line(&card.persian_antonyms, &card.english_antonyms)
        ));
    }

    if let Some(ref note) = card.extra_note {
        lines.push(String::new());
        lines.push(format!("{} {}", paint("نکته:", Color::YELLOW, use_color), note));
    }

    lines.join("\n")
}
