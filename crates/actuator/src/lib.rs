//! The view layer of the kanji 2048 game.
//!
//! [`HtmlActuator`] turns a [`Grid`](kanji_2048_types::Grid) and its
//! [`Metadata`](kanji_2048_types::Metadata) into tile, score and message
//! markup on a [`Surface`](kanji_2048_dom::Surface). It owns no game rules:
//! whatever the controller hands over is drawn as-is.
//!
//! # Module Structure
//!
//! - [`actuator`]: the renderer and its frame-deferred actuation
//! - [`numerals`]: digit-by-digit translation into daiji or kanji numerals
//! - [`message`]: end-of-game message states
//! - [`page`]: the page skeleton the renderer binds to
//!
//! # Example
//!
//! ```
//! use kanji_2048_actuator::dom::Surface;
//! use kanji_2048_actuator::{build_game_page, ActuatorConfig, HtmlActuator};
//! use kanji_2048_types::{Grid, Metadata, NumeralType, Tile};
//!
//! let mut actuator = HtmlActuator::new(build_game_page(4), ActuatorConfig::default()).unwrap();
//!
//! let mut grid = Grid::new(4);
//! grid.insert_tile(Tile::new(4, 0, 0)).unwrap();
//! actuator.actuate(&grid, &Metadata::new(4, 4, NumeralType::Daiji));
//! actuator.run_animation_frame();
//!
//! let doc = actuator.surface();
//! let inner = doc.query_selector(".tile-inner").unwrap();
//! assert_eq!(doc.text_content(inner), "肆");
//! ```

pub mod actuator;
pub mod error;
pub mod message;
pub mod numerals;
pub mod page;

pub use kanji_2048_dom as dom;
pub use kanji_2048_types as types;

pub use actuator::{ActuatorConfig, Containers, HtmlActuator};
pub use error::ActuatorError;
pub use message::MessageState;
pub use page::build_game_page;
