//! Observable state of a study session

use serde::Serialize;

use crate::flashcards::{LexicalRecord, RatingTally};
use crate::provider::ProviderError;

/// Where the current card slot stands
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CardPhase {
    /// Session created, nothing requested yet
    Idle,
    /// Waiting on the provider for the current card
    Loading,
    Ready,
    Error { message: String },
}

/// Look-ahead result for the card after the one on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefetchSlot {
    pub index: usize,
    pub record: LexicalRecord,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Index into the word list, always in range
    pub current_index: usize,
    pub card: Option<LexicalRecord>,
    pub phase: CardPhase,
    pub flipped: bool,
    /// `(current_index + 1) / word_count * 100`, updated when a load settles
    pub progress: f64,
    pub prefetch: Option<PrefetchSlot>,
    /// Target index of the outstanding look-ahead fetch, if any
    pub prefetch_in_flight: Option<usize>,
    pub ratings: RatingTally,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self {
            current_index: 0,
            card: None,
            phase: CardPhase::Idle,
            flipped: false,
            progress: 0.0,
            prefetch: None,
            prefetch_in_flight: None,
            ratings: RatingTally::default(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == CardPhase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match self.phase {
            CardPhase::Error { ref message } => Some(message),
            _ => None,
        }
    }

    /// The card to show, only once the slot is ready
    pub fn visible_card(&self) -> Option<&LexicalRecord> {
        match self.phase {
            CardPhase::Ready => self.card.as_ref(),
            _ => None,
        }
    }
}

/// Completion of a provider call spawned by the controller
#[derive(Debug)]
pub enum SessionEvent {
    /// Foreground fetch for the card at `index`
    CardFetched {
        index: usize,
        word: String,
        result: Result<LexicalRecord, ProviderError>,
    },
    /// Look-ahead fetch for `index`
    Prefetched {
        index: usize,
        word: String,
        result: Result<LexicalRecord, ProviderError>,
    },
}
