use anyhow::Result;

use crate::app::App;
use crate::render::terminal::Color;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let cached = app.cache().load();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = app
                .words
                .iter()
                .enumerate()
                .map(|(index, word)| {
                    serde_json::json!({
                        "index": index,
                        "word": word,
                        "cached": cached.contains_key(word),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let width = app.words.len().to_string().len();

            for (index, word) in app.words.iter().enumerate() {
                let marker = if cached.contains_key(word) {
                    if use_color {
                        format!("{}\u{2713}{}", Color::GREEN, Color::RESET)
                    } else {
                        "\u{2713}".to_string()
                    }
                } else {
                    " ".to_string()
                };
                println!("{:>width$}  {} {}", index + 1, marker, word, width = width);
            }

            let hits = app.words.iter().filter(|w| cached.contains_key(*w)).count();
            println!("\n{} words, {} cached", app.words.len(), hits);
        }
    }

    Ok(())
}
