//! Minimal retained document used as the rendering substrate.
//!
//! The actuator only needs a handful of DOM capabilities: create an element,
//! set or toggle its classes, set its text, append and clear children, query
//! by selector and schedule work for the next repaint. [`Surface`] names those
//! capabilities; [`Document`] implements them in memory so the view layer can
//! be driven and inspected without a browser.
//!
//! # Example
//!
//! ```
//! use kanji_2048_dom::{Document, Surface};
//!
//! let mut doc = Document::new();
//! let tile = doc.create_element("div");
//! doc.set_class_name(tile, "tile tile-2");
//! doc.set_text_content(tile, "貳");
//! doc.append_child(doc.root(), tile);
//!
//! assert_eq!(doc.query_selector(".tile-2"), Some(tile));
//! assert_eq!(doc.to_html_of(tile), r#"<div class="tile tile-2">貳</div>"#);
//! ```

pub mod document;
pub mod frame;
pub mod markup;

pub use document::{Document, ElementId, Surface};
pub use frame::{FrameQueue, FrameRequestId};
