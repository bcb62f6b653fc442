//! Page skeleton the actuator binds to.

use kanji_2048_dom::{Document, ElementId, Surface};
use kanji_2048_types::classes;

/// Build the game page markup with a `size × size` background grid.
pub fn build_game_page(size: usize) -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let container = child(&mut doc, root, "div", "container");
    let heading = child(&mut doc, container, "div", "heading");
    let title = child(&mut doc, heading, "h1", "title");
    doc.set_text_content(title, "2048");
    let scores = child(&mut doc, heading, "div", "scores-container");
    let score = child(&mut doc, scores, "div", classes::SCORE_CONTAINER);
    doc.set_text_content(score, "0");
    let best = child(&mut doc, scores, "div", classes::BEST_CONTAINER);
    doc.set_text_content(best, "0");

    child(&mut doc, container, "div", classes::HEADER_CONTAINER);

    let game = child(&mut doc, container, "div", "game-container");
    let message = child(&mut doc, game, "div", classes::GAME_MESSAGE);
    child(&mut doc, message, "p", "");
    child(&mut doc, message, "div", "lower");

    let grid = child(&mut doc, game, "div", "grid-container");
    for _ in 0..size {
        let row = child(&mut doc, grid, "div", "grid-row");
        for _ in 0..size {
            child(&mut doc, row, "div", "grid-cell");
        }
    }

    child(&mut doc, game, "div", classes::TILE_CONTAINER);
    doc
}

fn child(doc: &mut Document, parent: ElementId, tag: &str, class: &str) -> ElementId {
    let el = doc.create_element(tag);
    if !class.is_empty() {
        doc.set_class_name(el, class);
    }
    doc.append_child(parent, el);
    el
}
