//! Key mapping from terminal events to replay viewer actions.

use crate::types::NumeralType;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the replay viewer should do in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    TogglePause,
    /// Apply exactly one replay step (also pauses auto-play).
    Step,
    ContinueGame,
    /// Redraw the current board in another numeral mode without re-rendering.
    SetNumerals(NumeralType),
}

/// Map keyboard input to viewer actions.
pub fn handle_key_event(key: KeyEvent) -> Option<ViewerAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(ViewerAction::TogglePause)
        }
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('N') => Some(ViewerAction::Step),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(ViewerAction::ContinueGame),

        KeyCode::Char('0') => Some(ViewerAction::SetNumerals(NumeralType::Arabic)),
        KeyCode::Char('1') => Some(ViewerAction::SetNumerals(NumeralType::Daiji)),
        KeyCode::Char('2') => Some(ViewerAction::SetNumerals(NumeralType::Kanji)),

        _ => None,
    }
}

/// Check if key should quit the viewer.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
