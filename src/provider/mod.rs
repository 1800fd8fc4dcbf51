//! Content provider for card enrichment
//!
//! A provider turns a headword into a [`LexicalRecord`]. There is exactly
//! one remote call per word and no retry; callers decide how a failure is
//! surfaced.

mod gemini;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

use crate::flashcards::LexicalRecord;

pub use gemini::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Provider returned no content")]
    EmptyResponse,

    #[error("Malformed card content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No API key configured (set GEMINI_API_KEY or provider.api_key)")]
    MissingApiKey,

    #[error("Provider task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Generate the card content for `word`.
    ///
    /// The returned record's `word` equals the requested term and every
    /// list field is present.
    async fn fetch(&self, word: &str) -> Result<LexicalRecord, ProviderError>;
}

/// Force the record's headword to the term that was asked for, since the
/// headword doubles as the cache key.
pub(crate) fn pin_headword(mut record: LexicalRecord, requested: &str) -> LexicalRecord {
    if record.word != requested {
        log::warn!(
            "Provider returned headword '{}' for '{}', keeping the requested term",
            record.word,
            requested
        );
        record.word = requested.to_string();
    }
    record
}
