use anyhow::Result;
use ratatui::prelude::Rect;

use flashtastic_lib::flashcards::Rating;
use flashtastic_lib::session::SessionController;
use flashtastic_lib::speech::SystemSpeaker;

use super::theme::Theme;
use crate::app::App;

pub struct TuiState {
    pub session: SessionController,
    pub speaker: SystemSpeaker,
    pub theme: Theme,

    // Card area for mouse hit-testing (updated each draw)
    pub card_area: Option<Rect>,

    pub flash_message: Option<String>,
    pub spinner_tick: usize,
    pub show_help: bool,
    pub quit: bool,
}

impl TuiState {
    /// Build the session and request the first card.
    /// Must run inside a tokio runtime context.
    pub fn new(app: &App) -> Result<Self> {
        Ok(Self::with_session(app.session()?, app.speaker()))
    }

    pub fn with_session(mut session: SessionController, speaker: SystemSpeaker) -> Self {
        session.start();
        Self {
            session,
            speaker,
            theme: Theme::default(),
            card_area: None,
            flash_message: None,
            spinner_tick: 0,
            show_help: false,
            quit: false,
        }
    }

    /// Apply finished provider calls and advance the spinner
    pub fn tick(&mut self) {
        self.session.pump();
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    pub fn has_card(&self) -> bool {
        self.session.state().visible_card().is_some()
    }

    pub fn is_flipped(&self) -> bool {
        self.session.state().flipped
    }

    pub fn flip(&mut self) {
        if self.has_card() {
            self.session.flip();
        }
    }

    pub fn skip(&mut self) {
        self.session.advance();
    }

    /// Ratings only apply once the answer is showing
    pub fn rate(&mut self, rating: Rating) {
        if self.is_flipped() {
            self.session.rate(rating);
        }
    }

    pub fn speak(&mut self) {
        let Some(word) = self.session.state().visible_card().map(|c| c.word.clone()) else {
            return;
        };

        if !self.speaker.is_available() {
            self.flash_message = Some("Text-to-speech is not available on this system".to_string());
        }
        self.speaker.speak_word(&word);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }
}
