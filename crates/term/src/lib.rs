//! Terminal frontend for the kanji 2048 page.
//!
//! A [`BoardView`] reads the actuator's [`Document`](dom::Document) the way
//! a stylesheet would (class names and text only) and paints it into a
//! [`FrameBuffer`]; a [`TerminalRenderer`] flushes framebuffers to the
//! terminal with diffed redraws.

pub mod board_view;
pub mod fb;
pub mod render_throttle;
pub mod renderer;

pub use kanji_2048_dom as dom;
pub use kanji_2048_types as types;

pub use board_view::{read_tiles, AnchorY, BoardView, TileMarkup, Viewport, MAX_GRID_SIZE};
pub use fb::{char_width, str_width, Cell, CellStyle, FrameBuffer, Rgb, CONTINUATION};
pub use render_throttle::{elapsed_ms, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
