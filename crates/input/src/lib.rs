//! Terminal input for the replay viewer.
//!
//! Maps `crossterm` key events into [`ViewerAction`]s. Gameplay input (moving
//! tiles) is not handled here; the viewer only replays recorded states.

pub mod map;

pub use kanji_2048_types as types;

pub use map::{handle_key_event, should_quit, ViewerAction};
