//! Class-name contract shared with presentation rules.
//!
//! These strings are matched byte-for-byte by stylesheets (and by the
//! terminal board view), so they must not change.

use crate::Position;

pub const TILE: &str = "tile";
pub const TILE_INNER: &str = "tile-inner";
pub const TILE_NEW: &str = "tile-new";
pub const TILE_MERGED: &str = "tile-merged";
pub const TILE_SUPER: &str = "tile-super";
pub const SCORE_ADDITION: &str = "score-addition";
pub const GAME_WON: &str = "game-won";
pub const GAME_OVER: &str = "game-over";

pub const HEADER_CONTAINER: &str = "header-container";
pub const TILE_CONTAINER: &str = "tile-container";
pub const SCORE_CONTAINER: &str = "score-container";
pub const BEST_CONTAINER: &str = "best-container";
pub const GAME_MESSAGE: &str = "game-message";

const POSITION_PREFIX: &str = "tile-position-";
const VALUE_PREFIX: &str = "tile-";

/// `tile-position-<x>-<y>` with 1-based coordinates.
pub fn position_class(pos: Position) -> String {
    format!("{}{}-{}", POSITION_PREFIX, pos.x + 1, pos.y + 1)
}

/// `tile-<value>`.
pub fn value_class(value: u32) -> String {
    format!("{}{}", VALUE_PREFIX, value)
}

/// Decode a position class back into zero-based coordinates.
pub fn parse_position_class(class: &str) -> Option<Position> {
    let rest = class.strip_prefix(POSITION_PREFIX)?;
    let (x, y) = rest.split_once('-')?;
    let x: usize = x.parse().ok()?;
    let y: usize = y.parse().ok()?;
    if x == 0 || y == 0 {
        return None;
    }
    Some(Position::new(x - 1, y - 1))
}

/// Decode a `tile-<value>` class. Other `tile-*` classes yield `None`.
pub fn parse_value_class(class: &str) -> Option<u32> {
    class.strip_prefix(VALUE_PREFIX)?.parse().ok()
}
