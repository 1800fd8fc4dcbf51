use anyhow::{Context, Result};

use crate::app::App;

pub fn run(app: &App, word: &str) -> Result<()> {
    let speaker = app.speaker();
    speaker
        .speak(word)
        .with_context(|| format!("Failed to speak '{}'", word))?;
    Ok(())
}
