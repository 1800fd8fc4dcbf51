//! The ordered word list a session cycles through

use crate::config::{ConfigError, Result};

/// Built-in study list, used when the configuration does not provide one
pub const DEFAULT_WORDS: &[&str] = &[
    "abundant", "accomplish", "acquire", "adapt", "anticipate", "approach",
    "assume", "benefit", "brief", "capable", "cautious", "challenge",
    "confident", "consider", "curious", "decline", "deliberate", "demand",
    "determine", "efficient", "eager", "emerge", "encourage", "essential",
    "evident", "familiar", "flexible", "generous", "genuine", "hesitate",
    "improve", "influence", "maintain", "modest", "obtain", "persuade",
    "precise", "pursue", "reluctant", "remarkable", "require", "resolve",
    "significant", "sincere", "sustain", "thorough", "tremendous", "vivid",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Build a list from raw entries. Entries are trimmed and blanks dropped;
    /// the result must not be empty.
    pub fn new(words: Vec<String>) -> Result<Self> {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Err(ConfigError::EmptyWordList);
        }

        Ok(Self { words })
    }

    /// Parse one word per line; `#` starts a comment line
    pub fn parse(text: &str) -> Result<Self> {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self::new(words)
    }

    pub fn builtin() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at `index`, wrapping around the end of the list
    pub fn get(&self, index: usize) -> &str {
        &self.words[index % self.words.len()]
    }

    /// Index following `index` in cyclic order
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.words.len()
    }

    pub fn position(&self, word: &str) -> Option<usize> {
        self.words.iter().position(|w| w == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> WordList {
        WordList::new(list.iter().map(|w| w.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_new_trims_and_drops_blanks() {
        let list = words(&[" run ", "", "jump", "   "]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), "run");
        assert!(!list.is_empty());
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(matches!(WordList::new(Vec::new()), Err(ConfigError::EmptyWordList)));
        assert!(matches!(WordList::parse("# only a comment\n\n"), Err(ConfigError::EmptyWordList)));
    }

    #[test]
    fn test_cyclic_indexing() {
        let list = words(&["run", "jump", "eat"]);
        assert_eq!(list.next_index(0), 1);
        assert_eq!(list.next_index(2), 0);
        assert_eq!(list.get(3), "run");
        assert_eq!(list.position("eat"), Some(2));
        assert_eq!(list.position("swim"), None);
    }

    #[test]
    fn test_builtin_has_no_duplicates() {
        let list = WordList::builtin();
        let mut seen = std::collections::HashSet::new();
        for word in list.iter() {
            assert!(seen.insert(word), "duplicate word {}", word);
        }
    }
}
