//! Kanji 2048 (workspace facade crate).
//!
//! The view layer lives in dedicated crates under `crates/`; this package
//! re-exports them as `kanji_2048::{actuator,dom,input,term,types}` and adds
//! the replay driver used by the `kanji-2048` binary.

pub mod config;
pub mod replay;

pub use kanji_2048_actuator as actuator;
pub use kanji_2048_dom as dom;
pub use kanji_2048_input as input;
pub use kanji_2048_term as term;
pub use kanji_2048_types as types;
