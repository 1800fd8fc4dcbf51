//! Configuration file handling
//!
//! Settings live in `<config_dir>/flashtastic/config.toml`. Every section is
//! optional; a missing file means defaults everywhere.
//!
//! ```toml
//! [provider]
//! api_key = "..."            # GEMINI_API_KEY / API_KEY take precedence
//! model = "gemini-2.5-flash"
//! timeout_secs = 30          # unset: no client-side timeout
//!
//! [cache]
//! dir = "/path/to/storage"
//!
//! [words]
//! list = ["run", "jump", "eat"]   # or: file = "words.txt"
//!
//! [speech]
//! command = "espeak-ng -v en-us"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::words::WordList;

/// Environment variables checked for the provider key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Word list is empty")]
    EmptyWordList,

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub cache: CacheConfig,
    pub words: WordsConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding the cache blob (default: data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,
    /// Newline-separated word file, used when `list` is not set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Synthesizer command line; the word is appended as the last argument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl AppConfig {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("flashtastic").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load configuration and apply environment overrides.
    ///
    /// An explicit `path` must exist; the default path may be missing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path()?;
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    log::debug!("No config file at {}, using defaults", default_path.display());
                    Self::default()
                }
            }
        };

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content)?;

        // Relative word files are resolved against the config file
        if let (Some(file), Some(parent)) = (config.words.file.as_mut(), path.parent()) {
            if file.is_relative() {
                *file = parent.join(&*file);
            }
        }

        Ok(config)
    }

    /// Override the API key from the environment
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());

        if let Some(key) = from_env {
            self.provider.api_key = Some(key);
        }
    }

    /// Resolve the word list: inline list, then word file, then built-in
    pub fn word_list(&self) -> Result<WordList> {
        if let Some(ref list) = self.words.list {
            return WordList::new(list.clone());
        }

        if let Some(ref file) = self.words.file {
            let content = fs::read_to_string(file).map_err(|source| ConfigError::Io {
                path: file.clone(),
                source,
            })?;
            return WordList::parse(&content);
        }

        Ok(WordList::builtin())
    }
}
