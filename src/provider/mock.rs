//! Scripted provider used by unit tests

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ContentProvider, ProviderError};
use crate::flashcards::LexicalRecord;

pub fn sample_record(word: &str) -> LexicalRecord {
    LexicalRecord {
        word: word.to_string(),
        ipa: format!("/{}/", word),
        english_definition: format!("Definition of {}", word),
        english_synonyms: vec![format!("{}-syn", word)],
        english_antonyms: Vec::new(),
        english_examples: vec![format!("They {} often.", word), format!("We {} now.", word)],
        persian_translation: format!("ترجمه {}", word),
        persian_phonetic: format!("تلفظ {}", word),
        persian_synonyms: Vec::new(),
        persian_antonyms: Vec::new(),
        persian_examples: vec!["مثال اول".to_string(), "مثال دوم".to_string()],
        extra_note: None,
    }
}

/// Answers every word with [`sample_record`] unless told to fail it, and
/// remembers the order of calls.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    calls: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, word: &str) {
        self.failing.lock().unwrap().insert(word.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, word: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|w| *w == word).count()
    }
}

#[async_trait]
impl ContentProvider for ScriptedProvider {
    async fn fetch(&self, word: &str) -> Result<LexicalRecord, ProviderError> {
        self.calls.lock().unwrap().push(word.to_string());

        if self.failing.lock().unwrap().contains(word) {
            return Err(ProviderError::Api {
                status: 500,
                message: format!("scripted failure for {}", word),
            });
        }

        Ok(sample_record(word))
    }
}
