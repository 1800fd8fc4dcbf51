use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run_stats(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = app.cache().stats();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": stats.key,
                "version": stats.version,
                "entries": stats.entries,
                "dir": app.cache_dir,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Key:      {}", stats.key);
            println!("Version:  {}", stats.version);
            println!("Entries:  {}", stats.entries);
            println!("Location: {}", app.cache_dir.display());
        }
    }

    Ok(())
}

pub fn run_clear(app: &App, format: &OutputFormat) -> Result<()> {
    let cache = app.cache();
    let removed = cache.stats().entries;
    cache.clear();
    log::info!("Cleared {} cached cards", removed);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "removed": removed }));
        }
        OutputFormat::Plain => {
            println!("Removed {} cached cards", removed);
        }
    }

    Ok(())
}
