mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashtastic", about = "Vocabulary flashcards for Persian speakers", version)]
struct Cli {
    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive study session
    #[cfg(feature = "tui")]
    Study,

    /// Print the card for a word, generating it if not cached
    Show {
        /// English headword
        word: String,
    },

    /// List the study words and whether each is cached
    Words,

    /// Inspect or clear the card cache
    #[command(subcommand)]
    Cache(CacheCommand),

    /// Pronounce a word with the system synthesizer
    Speak {
        /// Text to speak
        word: String,
    },
}

#[derive(Subcommand)]
enum CacheCommand {
    /// Show entry count and location
    Stats,

    /// Remove every cached card
    Clear,
}

/// Send log output to a file while the TUI owns the terminal
#[cfg(feature = "tui")]
fn init_file_logging() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .context("Failed to get data directory")?
        .join("flashtastic");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join("flashtastic.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(path)
}

#[cfg(feature = "tui")]
fn run_tui(config: Option<&std::path::Path>) -> Result<()> {
    let log_path = init_file_logging()?;
    log::info!("Starting study session, logging to {}", log_path.display());

    let app = app::App::new(config)?;
    tui::run(app)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    match cli.command {
        #[cfg(feature = "tui")]
        None | Some(Command::Study) => {
            run_tui(cli.config.as_deref())?;
        }
        #[cfg(not(feature = "tui"))]
        None => {
            eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
            eprintln!("Run with --help for usage.");
            std::process::exit(1);
        }
        Some(Command::Show { word }) => {
            env_logger::init();
            let app = app::App::new(cli.config.as_deref())?;
            commands::show::run(&app, &word, &cli.format, use_color)?;
        }
        Some(Command::Words) => {
            env_logger::init();
            let app = app::App::new(cli.config.as_deref())?;
            commands::words::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Cache(subcmd)) => {
            env_logger::init();
            let app = app::App::new(cli.config.as_deref())?;
            match subcmd {
                CacheCommand::Stats => commands::cache::run_stats(&app, &cli.format)?,
                CacheCommand::Clear => commands::cache::run_clear(&app, &cli.format)?,
            }
        }
        Some(Command::Speak { word }) => {
            env_logger::init();
            let app = app::App::new(cli.config.as_deref())?;
            commands::speak::run(&app, &word)?;
        }
    }

    Ok(())
}
