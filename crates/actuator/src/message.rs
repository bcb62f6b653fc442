use kanji_2048_types::{classes, LOSE_TEXT, WIN_TEXT};

/// Visibility of the end-of-game message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageState {
    #[default]
    Hidden,
    Won,
    Lost,
}

impl MessageState {
    pub fn for_outcome(won: bool) -> Self {
        if won {
            MessageState::Won
        } else {
            MessageState::Lost
        }
    }

    /// Class applied to the message region, if any.
    pub fn class(self) -> Option<&'static str> {
        match self {
            MessageState::Hidden => None,
            MessageState::Won => Some(classes::GAME_WON),
            MessageState::Lost => Some(classes::GAME_OVER),
        }
    }

    pub fn text(self) -> Option<&'static str> {
        match self {
            MessageState::Hidden => None,
            MessageState::Won => Some(WIN_TEXT),
            MessageState::Lost => Some(LOSE_TEXT),
        }
    }

    pub fn is_visible(self) -> bool {
        self != MessageState::Hidden
    }
}
