//! Core types module - shared data structures and constants
//!
//! This module defines the values the view layer consumes from the game
//! controller. They are plain data with serde support, so the same types are
//! used by the actuator, the terminal frontend and the JSON replay loader.
//!
//! # Board
//!
//! - **Grid**: square matrix of cells stored column-major (`cells[x][y]`)
//! - **Tile**: value plus current position, with optional slide origin and
//!   merge sources
//! - **Metadata**: score, best score, numeral mode and termination flags
//!
//! # Numeral Modes
//!
//! | Code | Mode | Digits |
//! |------|------|--------|
//! | 0 | `Arabic` | `0123456789` |
//! | 1 | `Daiji` | `零壹貳參肆伍陸柒捌玖` |
//! | 2 | `Kanji` | `〇一二三四五六七八九` |
//!
//! Any other code falls back to `Arabic`.
//!
//! # Examples
//!
//! ```
//! use kanji_2048_types::{Grid, NumeralType, Position, Tile};
//!
//! let mut grid = Grid::new(4);
//! grid.insert_tile(Tile::new(2, 0, 1)).unwrap();
//!
//! assert_eq!(grid.tile_count(), 1);
//! assert_eq!(grid.cell(Position::new(0, 1)).map(|t| t.value), Some(2));
//! assert_eq!(NumeralType::from_code(7), NumeralType::Arabic);
//! ```

pub mod classes;
pub mod grid;
pub mod metadata;

pub use grid::{Grid, GridError, Position, Tile};
pub use metadata::Metadata;

use serde::{Deserialize, Serialize};

/// Default board edge length.
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Tiles above this value get the `tile-super` marker.
pub const SUPER_TILE_THRESHOLD: u32 = 2048;

/// Text shown in the message region on a win.
pub const WIN_TEXT: &str = "勝利";

/// Text shown in the message region on a loss.
pub const LOSE_TEXT: &str = "失敗";

/// Glyph set used to display numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub enum NumeralType {
    /// Plain decimal digits.
    Arabic,
    /// Financial numerals (daiji).
    #[default]
    Daiji,
    /// Common kanji numerals.
    Kanji,
}

impl NumeralType {
    /// Decode a numeral code; unknown codes select plain digits.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => NumeralType::Daiji,
            2 => NumeralType::Kanji,
            _ => NumeralType::Arabic,
        }
    }

    /// Decoding used for wire metadata that omits the field.
    pub fn wire_default() -> Self {
        NumeralType::Arabic
    }

    pub fn code(self) -> u8 {
        match self {
            NumeralType::Arabic => 0,
            NumeralType::Daiji => 1,
            NumeralType::Kanji => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NumeralType::Arabic => "arabic",
            NumeralType::Daiji => "daiji",
            NumeralType::Kanji => "kanji",
        }
    }
}

impl From<i64> for NumeralType {
    fn from(code: i64) -> Self {
        NumeralType::from_code(code)
    }
}

impl From<NumeralType> for u8 {
    fn from(value: NumeralType) -> Self {
        value.code()
    }
}
