use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, word: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let card = app.card(word)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_card(&card, use_color));
        }
    }

    Ok(())
}
