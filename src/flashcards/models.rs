//! Data models for vocabulary cards

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generated content for one headword: the front of the card is English,
/// the back is Persian.
///
/// Deserialization goes through [`RawLexicalRecord`] so that list fields
/// which are missing or `null` come back as empty vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawLexicalRecord")]
pub struct LexicalRecord {
    pub word: String,
    /// IPA transcription
    pub ipa: String,
    pub english_definition: String,
    pub english_synonyms: Vec<String>,
    pub english_antonyms: Vec<String>,
    pub english_examples: Vec<String>,
    pub persian_translation: String,
    /// Simplified phonetic spelling in Persian script
    pub persian_phonetic: String,
    pub persian_synonyms: Vec<String>,
    pub persian_antonyms: Vec<String>,
    pub persian_examples: Vec<String>,
    /// Optional grammar or usage note, in Persian
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_note: Option<String>,
}

impl LexicalRecord {
    pub fn has_synonyms(&self) -> bool {
        !self.persian_synonyms.is_empty() || !self.english_synonyms.is_empty()
    }

    pub fn has_antonyms(&self) -> bool {
        !self.persian_antonyms.is_empty() || !self.english_antonyms.is_empty()
    }
}

/// Wire shape of a record as the provider (or an older cache blob) may send it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLexicalRecord {
    word: String,
    ipa: String,
    english_definition: String,
    english_synonyms: Option<Vec<String>>,
    english_antonyms: Option<Vec<String>>,
    english_examples: Option<Vec<String>>,
    persian_translation: String,
    persian_phonetic: String,
    persian_synonyms: Option<Vec<String>>,
    persian_antonyms: Option<Vec<String>>,
    persian_examples: Option<Vec<String>>,
    extra_note: Option<String>,
}

impl From<RawLexicalRecord> for LexicalRecord {
    fn from(raw: RawLexicalRecord) -> Self {
        Self {
            word: raw.word,
            ipa: raw.ipa,
            english_definition: raw.english_definition,
            english_synonyms: raw.english_synonyms.unwrap_or_default(),
            english_antonyms: raw.english_antonyms.unwrap_or_default(),
            english_examples: raw.english_examples.unwrap_or_default(),
            persian_translation: raw.persian_translation,
            persian_phonetic: raw.persian_phonetic,
            persian_synonyms: raw.persian_synonyms.unwrap_or_default(),
            persian_antonyms: raw.persian_antonyms.unwrap_or_default(),
            persian_examples: raw.persian_examples.unwrap_or_default(),
            extra_note: raw.extra_note.filter(|note| !note.trim().is_empty()),
        }
    }
}

/// Self-assessed recall after revealing a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Easy,
    Good,
    Hard,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Good => write!(f, "good"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Per-session rating counts. Observability only: nothing reads these
/// back to change ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingTally {
    pub easy: usize,
    pub good: usize,
    pub hard: usize,
}

impl RatingTally {
    pub fn record(&mut self, rating: Rating) {
        match rating {
            Rating::Easy => self.easy += 1,
            Rating::Good => self.good += 1,
            Rating::Hard => self.hard += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.easy + self.good + self.hard
    }
}
