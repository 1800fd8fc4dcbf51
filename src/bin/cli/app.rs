use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use flashtastic_lib::config::AppConfig;
use flashtastic_lib::flashcards::LexicalRecord;
use flashtastic_lib::provider::{ContentProvider, GeminiClient};
use flashtastic_lib::session::SessionController;
use flashtastic_lib::speech::SystemSpeaker;
use flashtastic_lib::storage::{CardCache, FileBackend};
use flashtastic_lib::words::WordList;

/// Shared application state for CLI commands and the TUI
pub struct App {
    pub config: AppConfig,
    pub words: WordList,
    pub cache_dir: PathBuf,
    pub runtime: Runtime,
}

impl App {
    /// Load configuration and resolve the word list and cache location
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = AppConfig::load(config_path).context("Failed to load configuration")?;
        let words = config.word_list().context("Failed to load word list")?;

        let cache_dir = match config.cache.dir {
            Some(ref dir) => dir.clone(),
            None => FileBackend::default_dir().context("Failed to get data directory")?,
        };

        let runtime = Runtime::new().context("Failed to start async runtime")?;

        log::debug!(
            "Loaded {} words, cache at {}",
            words.len(),
            cache_dir.display()
        );

        Ok(Self {
            config,
            words,
            cache_dir,
            runtime,
        })
    }

    pub fn cache(&self) -> CardCache {
        CardCache::new(Box::new(FileBackend::new(self.cache_dir.clone())))
    }

    pub fn provider(&self) -> Result<Arc<dyn ContentProvider>> {
        let client = GeminiClient::new(&self.config.provider)
            .context("Failed to create content provider")?;
        Ok(Arc::new(client))
    }

    pub fn speaker(&self) -> SystemSpeaker {
        SystemSpeaker::detect(&self.config.speech)
    }

    pub fn session(&self) -> Result<SessionController> {
        Ok(SessionController::new(
            self.words.clone(),
            self.provider()?,
            self.cache(),
        ))
    }

    /// Cached card for `word`, or a freshly generated one that is then cached
    pub fn card(&self, word: &str) -> Result<LexicalRecord> {
        let cache = self.cache();
        if let Some(record) = cache.get(word) {
            return Ok(record);
        }

        let provider = self.provider()?;
        let record = self
            .runtime
            .block_on(provider.fetch(word))
            .with_context(|| format!("Failed to generate card for '{}'", word))?;
        cache.put(word, &record);
        Ok(record)
    }
}
