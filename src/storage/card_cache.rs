//! Versioned card cache
//!
//! All cards live in a single JSON blob under [`CACHE_KEY`]:
//! ```json
//! { "version": 1, "cards": { "run": { "word": "run", ... } } }
//! ```
//! A blob written with a different version is ignored as a whole; there is
//! no per-entry migration. Caching is best effort: every storage failure is
//! logged here and never reaches the caller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::backend::{Result, StorageBackend};
use crate::flashcards::LexicalRecord;

/// Storage key holding the blob
pub const CACHE_KEY: &str = "flashtastic-cache";

/// Bump to invalidate every stored card after a record schema change
pub const CACHE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheBlob {
    pub version: u32,
    #[serde(default)]
    pub cards: HashMap<String, LexicalRecord>,
}

/// Blob as read back from storage, with entries left undecoded so one
/// malformed card does not take the rest down with it
#[derive(Debug, Deserialize)]
struct StoredBlob {
    version: u32,
    #[serde(default)]
    cards: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub key: &'static str,
    pub version: u32,
    pub entries: usize,
}

pub struct CardCache {
    backend: Box<dyn StorageBackend>,
    version: u32,
}

impl CardCache {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self::with_version(backend, CACHE_VERSION)
    }

    /// Cache that reads and writes blobs tagged with `version`
    pub fn with_version(backend: Box<dyn StorageBackend>, version: u32) -> Self {
        Self { backend, version }
    }

    /// All cached cards. Empty when the blob is missing, unreadable, or
    /// was written by another version.
    pub fn load(&self) -> HashMap<String, LexicalRecord> {
        match self.try_load() {
            Ok(cards) => cards,
            Err(e) => {
                log::error!("Failed to read from cache: {}", e);
                HashMap::new()
            }
        }
    }

    fn try_load(&self) -> Result<HashMap<String, LexicalRecord>> {
        let Some(content) = self.backend.read(CACHE_KEY)? else {
            return Ok(HashMap::new());
        };

        let blob: StoredBlob = serde_json::from_str(&content)?;
        if blob.version != self.version {
            log::info!(
                "Ignoring card cache written by version {} (expected {})",
                blob.version,
                self.version
            );
            return Ok(HashMap::new());
        }

        let cards = blob
            .cards
            .into_iter()
            .filter_map(|(word, value)| match serde_json::from_value(value) {
                Ok(record) => Some((word, record)),
                Err(e) => {
                    log::warn!("Dropping malformed cache entry '{}': {}", word, e);
                    None
                }
            })
            .collect();

        Ok(cards)
    }

    pub fn get(&self, word: &str) -> Option<LexicalRecord> {
        self.load().remove(word)
    }

    /// Merge one card into the stored blob.
    ///
    /// Re-reads the full mapping before writing; the read-modify-write is
    /// not atomic across processes.
    pub fn put(&self, word: &str, record: &LexicalRecord) {
        if let Err(e) = self.try_put(word, record) {
            log::error!("Failed to write to cache: {}", e);
        }
    }

    fn try_put(&self, word: &str, record: &LexicalRecord) -> Result<()> {
        let mut cards = self.load();
        cards.insert(word.to_string(), record.clone());

        let blob = CacheBlob {
            version: self.version,
            cards,
        };
        let content = serde_json::to_string(&blob)?;
        self.backend.write(CACHE_KEY, &content)
    }

    /// Drop every cached card
    pub fn clear(&self) {
        if let Err(e) = self.backend.remove(CACHE_KEY) {
            log::error!("Failed to clear cache: {}", e);
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            key: CACHE_KEY,
            version: self.version,
            entries: self.load().len(),
        }
    }
}
