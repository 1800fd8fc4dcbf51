use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use flashtastic_lib::flashcards::Rating;

use super::app_state::TuiState;

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit = true;
        return;
    }

    if state.show_help {
        match key.code {
            KeyCode::Char('q') => state.quit = true,
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter => state.show_help = false,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char(' ') | KeyCode::Enter => state.flip(),
        KeyCode::Char('n') | KeyCode::Right => state.skip(),
        KeyCode::Char('1') => state.rate(Rating::Hard),
        KeyCode::Char('2') => state.rate(Rating::Good),
        KeyCode::Char('3') => state.rate(Rating::Easy),
        KeyCode::Char('p') => state.speak(),
        KeyCode::Char('t') => state.toggle_theme(),
        KeyCode::Char('?') => state.show_help = true,
        _ => {}
    }
}

pub fn handle_mouse(state: &mut TuiState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) || state.show_help {
        return;
    }

    if let Some(ref area) = state.card_area {
        let (col, row) = (mouse.column, mouse.row);
        if col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
        {
            state.flip();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use ratatui::prelude::Rect;

    use flashtastic_lib::flashcards::LexicalRecord;
    use flashtastic_lib::provider::{ContentProvider, ProviderError};
    use flashtastic_lib::session::{CardPhase, SessionController};
    use flashtastic_lib::speech::SystemSpeaker;
    use flashtastic_lib::storage::{CardCache, MemoryBackend};
    use flashtastic_lib::words::WordList;

    use super::*;
    use crate::tui::theme::Theme;

    struct EchoProvider;

    #[async_trait]
    impl ContentProvider for EchoProvider {
        async fn fetch(&self, word: &str) -> Result<LexicalRecord, ProviderError> {
            Ok(serde_json::from_value(serde_json::json!({
                "word": word,
                "ipa": "/x/",
                "englishDefinition": "definition",
                "englishExamples": [],
                "persianTranslation": "ترجمه",
                "persianPhonetic": "فونتیک",
            }))?)
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    async fn ready_state() -> TuiState {
        let words = WordList::new(vec!["run".into(), "jump".into(), "eat".into()]).unwrap();
        let cache = CardCache::new(Box::new(MemoryBackend::new()));
        let session = SessionController::new(words, Arc::new(EchoProvider), cache);
        let mut state = TuiState::with_session(session, SystemSpeaker::disabled());
        state.session.settle().await;
        assert_eq!(state.session.state().phase, CardPhase::Ready);
        state
    }

    #[tokio::test]
    async fn test_flip_and_rate() {
        let mut state = ready_state().await;

        // Rating is ignored until the answer is showing
        handle_key(&mut state, key(KeyCode::Char('2')));
        assert_eq!(state.session.state().current_index, 0);

        handle_key(&mut state, key(KeyCode::Char(' ')));
        assert!(state.is_flipped());

        handle_key(&mut state, key(KeyCode::Char('3')));
        assert_eq!(state.session.state().current_index, 1);
        assert_eq!(state.session.state().ratings.easy, 1);
        assert!(!state.is_flipped());
    }

    #[tokio::test]
    async fn test_skip_and_theme() {
        let mut state = ready_state().await;

        handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(state.session.state().current_index, 1);

        handle_key(&mut state, key(KeyCode::Char('t')));
        assert_eq!(state.theme, Theme::Light);
    }

    #[tokio::test]
    async fn test_help_swallows_keys() {
        let mut state = ready_state().await;

        handle_key(&mut state, key(KeyCode::Char('?')));
        assert!(state.show_help);
        handle_key(&mut state, key(KeyCode::Char('n')));
        assert_eq!(state.session.state().current_index, 0);
        handle_key(&mut state, key(KeyCode::Esc));
        assert!(!state.show_help);
        assert!(!state.quit);

        handle_key(&mut state, key(KeyCode::Esc));
        assert!(state.quit);
    }

    #[tokio::test]
    async fn test_speak_without_synthesizer_flashes() {
        let mut state = ready_state().await;
        handle_key(&mut state, key(KeyCode::Char('p')));
        assert!(state.flash_message.is_some());
    }

    #[tokio::test]
    async fn test_click_on_card_toggles_flip() {
        let mut state = ready_state().await;
        state.card_area = Some(Rect::new(10, 5, 40, 10));

        handle_mouse(&mut state, click(2, 2));
        assert!(!state.is_flipped());

        handle_mouse(&mut state, click(20, 8));
        assert!(state.is_flipped());
        handle_mouse(&mut state, click(20, 8));
        assert!(!state.is_flipped());
    }
}
