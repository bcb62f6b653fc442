use serde::{Deserialize, Serialize};

use crate::NumeralType;

/// Per-actuation game status passed alongside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub score: u64,
    pub best_score: u64,
    /// Plain digits when absent on the wire.
    #[serde(default = "NumeralType::wire_default")]
    pub numeral_type: NumeralType,
    #[serde(default)]
    pub terminated: bool,
    /// The game was lost.
    #[serde(default)]
    pub over: bool,
    #[serde(default)]
    pub won: bool,
}

impl Metadata {
    pub fn new(score: u64, best_score: u64, numeral_type: NumeralType) -> Self {
        Self {
            score,
            best_score,
            numeral_type,
            ..Self::default()
        }
    }

    pub fn game_over(mut self) -> Self {
        self.terminated = true;
        self.over = true;
        self
    }

    pub fn game_won(mut self) -> Self {
        self.terminated = true;
        self.won = true;
        self
    }
}
