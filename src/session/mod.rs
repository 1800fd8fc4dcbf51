//! Study session controller
//!
//! The controller walks a fixed word list in cyclic order. Loading a card
//! tries, in order:
//! 1. the look-ahead slot, when it holds exactly the requested index
//!    (instant, never shows a loading state)
//! 2. the card cache
//! 3. the content provider
//!
//! and then starts a look-ahead fetch for the following word.
//!
//! Provider calls run as tokio tasks and report back through a channel as
//! [`SessionEvent`]s. Events are applied on the controller's own thread
//! (`pump`, `process_next`, `settle`), so state is never touched
//! concurrently. In-flight calls are not cancelled when the user moves on:
//! a late result is still applied, and a late look-ahead result overwrites
//! whatever the slot holds.

mod state;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::flashcards::{LexicalRecord, Rating};
use crate::provider::{ContentProvider, ProviderError};
use crate::storage::CardCache;
use crate::words::WordList;

pub use state::{CardPhase, PrefetchSlot, SessionEvent, SessionState};

/// Shown in place of the card when its content could not be generated
pub const FETCH_ERROR_MESSAGE: &str =
    "خطا در تولید محتوای فلش‌کارت. لطفاً دوباره تلاش کنید.";

#[derive(Debug, Clone, Copy)]
enum FetchKind {
    Card,
    Prefetch,
}

pub struct SessionController {
    words: WordList,
    provider: Arc<dyn ContentProvider>,
    cache: CardCache,
    state: SessionState,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    /// Spawned provider calls whose events have not been applied yet
    outstanding: usize,
}

impl SessionController {
    pub fn new(words: WordList, provider: Arc<dyn ContentProvider>, cache: CardCache) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            words,
            provider,
            cache,
            state: SessionState::new(),
            events_tx,
            events_rx,
            outstanding: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn current_word(&self) -> &str {
        self.words.get(self.state.current_index)
    }

    pub fn cache(&self) -> &CardCache {
        &self.cache
    }

    /// Whether any provider call is still in flight
    pub fn has_pending_work(&self) -> bool {
        self.outstanding > 0
    }

    /// Load the first card of the session
    pub fn start(&mut self) {
        self.load_card(0);
    }

    fn progress_for(&self, index: usize) -> f64 {
        (index + 1) as f64 / self.words.len() as f64 * 100.0
    }

    /// Show the card at `index` (taken modulo the word count).
    ///
    /// Every path replaces the phase, which also clears a previous error.
    pub fn load_card(&mut self, index: usize) {
        let index = index % self.words.len();
        self.state.current_index = index;
        self.state.flipped = false;

        match self.state.prefetch.take() {
            Some(slot) if slot.index == index => {
                log::debug!("Using prefetched card for '{}'", self.words.get(index));
                self.state.card = Some(slot.record);
                self.state.progress = self.progress_for(index);
                self.state.phase = CardPhase::Ready;
                self.prefetch_next(index);
                return;
            }
            other => self.state.prefetch = other,
        }

        self.state.phase = CardPhase::Loading;
        self.state.card = None;

        if let Some(record) = self.cache.get(self.words.get(index)) {
            self.state.card = Some(record);
            self.state.phase = CardPhase::Ready;
            self.state.progress = self.progress_for(index);
            self.prefetch_next(index);
            return;
        }

        self.spawn_fetch(index, FetchKind::Card);
    }

    /// Start the look-ahead fetch for the card after `current_index`.
    ///
    /// No-op when the slot already holds that card or a fetch for it is
    /// outstanding.
    pub fn prefetch_next(&mut self, current_index: usize) {
        let next = self.words.next_index(current_index);

        let slot_ready = self.state.prefetch.as_ref().is_some_and(|slot| slot.index == next);
        if slot_ready || self.state.prefetch_in_flight == Some(next) {
            return;
        }

        if let Some(record) = self.cache.get(self.words.get(next)) {
            self.state.prefetch = Some(PrefetchSlot { index: next, record });
            return;
        }

        self.state.prefetch_in_flight = Some(next);
        self.spawn_fetch(next, FetchKind::Prefetch);
    }

    /// Move to the next word, wrapping at the end of the list
    pub fn advance(&mut self) {
        let next = self.words.next_index(self.state.current_index);
        self.load_card(next);
    }

    /// Record a self-rating for the current card and move on.
    ///
    /// Ratings are logged and counted only; ordering never changes.
    pub fn rate(&mut self, rating: Rating) {
        log::info!("User marked '{}' as: {}", self.current_word(), rating);
        self.state.ratings.record(rating);
        self.advance();
    }

    pub fn flip(&mut self) {
        self.state.flipped = !self.state.flipped;
    }

    pub fn reveal(&mut self) {
        self.state.flipped = true;
    }

    fn spawn_fetch(&mut self, index: usize, kind: FetchKind) {
        let word = self.words.get(index).to_string();
        let provider = Arc::clone(&self.provider);
        let events_tx = self.events_tx.clone();
        self.outstanding += 1;

        log::debug!("Requesting card content for '{}' ({:?})", word, kind);

        tokio::spawn(async move {
            // Run the call as its own task so a panic still yields an event
            // and `outstanding` is always decremented
            let fetch = {
                let word = word.clone();
                tokio::spawn(async move { provider.fetch(&word).await })
            };
            let result = fetch.await.unwrap_or_else(|e| Err(ProviderError::from(e)));
            let event = match kind {
                FetchKind::Card => SessionEvent::CardFetched { index, word, result },
                FetchKind::Prefetch => SessionEvent::Prefetched { index, word, result },
            };
            // The controller owns the receiver; a closed channel means the
            // session is gone and the result has nowhere to go.
            let _ = events_tx.send(event);
        });
    }

    /// Apply every completed provider call without waiting.
    /// Returns the number of events applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next provider call to complete and apply it.
    /// Returns `false` when nothing is in flight.
    pub async fn process_next(&mut self) -> bool {
        if self.outstanding == 0 {
            return false;
        }
        match self.events_rx.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    /// Apply events until no provider call is in flight, including the
    /// look-ahead fetches started along the way
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    fn apply(&mut self, event: SessionEvent) {
        self.outstanding = self.outstanding.saturating_sub(1);
        match event {
            SessionEvent::CardFetched { index, word, result } => {
                self.finish_card(index, &word, result)
            }
            SessionEvent::Prefetched { index, word, result } => {
                self.finish_prefetch(index, &word, result)
            }
        }
    }

    fn finish_card(&mut self, index: usize, word: &str, result: Result<LexicalRecord, ProviderError>) {
        if index != self.state.current_index {
            log::debug!(
                "Applying late result for '{}' while index {} is current",
                word,
                self.state.current_index
            );
        }

        match result {
            Ok(record) => {
                self.cache.put(word, &record);
                self.state.card = Some(record);
                self.state.phase = CardPhase::Ready;
            }
            Err(e) => {
                log::error!("Failed to load card for '{}': {}", word, e);
                self.state.phase = CardPhase::Error {
                    message: FETCH_ERROR_MESSAGE.to_string(),
                };
            }
        }

        self.state.progress = self.progress_for(index);
        self.prefetch_next(index);
    }

    fn finish_prefetch(
        &mut self,
        index: usize,
        word: &str,
        result: Result<LexicalRecord, ProviderError>,
    ) {
        if self.state.prefetch_in_flight == Some(index) {
            self.state.prefetch_in_flight = None;
        }

        match result {
            Ok(record) => {
                self.cache.put(word, &record);
                self.state.prefetch = Some(PrefetchSlot { index, record });
            }
            Err(e) => {
                log::error!("Failed to prefetch {}: {}", word, e);
            }
        }
    }
}
