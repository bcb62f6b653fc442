//! BoardView: paints the game page of a `Document` into a framebuffer.
//!
//! This module is pure (no I/O). It plays the role a stylesheet plays in a
//! browser: it reads only the markup the actuator produced (tile classes,
//! tile text, score and message regions) and decides how it looks.

use kanji_2048_dom::{Document, ElementId, Surface};
use kanji_2048_types::{classes, Position, DEFAULT_GRID_SIZE};

use crate::fb::{str_width, CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// What a tile wrapper says about itself through its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMarkup {
    pub position: Position,
    pub value: Option<u32>,
    pub text: String,
    pub is_new: bool,
    pub is_merged: bool,
    pub is_super: bool,
}

impl TileMarkup {
    /// Read a `div.tile` wrapper. `None` when it carries no position class.
    pub fn read(doc: &Document, wrapper: ElementId) -> Option<Self> {
        let mut position = None;
        let mut value = None;
        let mut is_new = false;
        let mut is_merged = false;
        let mut is_super = false;
        for class in doc.class_list(wrapper) {
            match class.as_str() {
                classes::TILE_NEW => is_new = true,
                classes::TILE_MERGED => is_merged = true,
                classes::TILE_SUPER => is_super = true,
                other => {
                    if let Some(pos) = classes::parse_position_class(other) {
                        position = Some(pos);
                    } else if let Some(v) = classes::parse_value_class(other) {
                        value = Some(v);
                    }
                }
            }
        }
        let text = doc
            .find_descendant(wrapper, &format!(".{}", classes::TILE_INNER))
            .map(|inner| doc.text_content(inner))
            .unwrap_or_default();
        Some(Self {
            position: position?,
            value,
            text,
            is_new,
            is_merged,
            is_super,
        })
    }
}

/// Every tile wrapper in the tile layer, in paint order.
pub fn read_tiles(doc: &Document) -> Vec<TileMarkup> {
    let Some(layer) = doc.query_selector(&format!(".{}", classes::TILE_CONTAINER)) else {
        return Vec::new();
    };
    doc.children(layer)
        .iter()
        .filter_map(|&wrapper| TileMarkup::read(doc, wrapper))
        .collect()
}

const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_CELL_BG: Rgb = Rgb::new(205, 193, 180);
const PAGE_BG: Rgb = Rgb::new(250, 248, 239);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

fn tile_colors(value: Option<u32>, is_super: bool) -> (Rgb, Rgb) {
    if is_super {
        return (Rgb::new(60, 58, 50), LIGHT_TEXT);
    }
    match value.unwrap_or(0) {
        2 => (Rgb::new(238, 228, 218), DARK_TEXT),
        4 => (Rgb::new(237, 224, 200), DARK_TEXT),
        8 => (Rgb::new(242, 177, 121), LIGHT_TEXT),
        16 => (Rgb::new(245, 149, 99), LIGHT_TEXT),
        32 => (Rgb::new(246, 124, 95), LIGHT_TEXT),
        64 => (Rgb::new(246, 94, 59), LIGHT_TEXT),
        128 => (Rgb::new(237, 207, 114), LIGHT_TEXT),
        256 => (Rgb::new(237, 204, 97), LIGHT_TEXT),
        512 => (Rgb::new(237, 200, 80), LIGHT_TEXT),
        1024 => (Rgb::new(237, 197, 63), LIGHT_TEXT),
        2048 => (Rgb::new(237, 194, 46), LIGHT_TEXT),
        _ => (Rgb::new(205, 193, 180), DARK_TEXT),
    }
}

/// Largest board the terminal view draws; bigger grids are clipped to it.
pub const MAX_GRID_SIZE: usize = 64;

/// Terminal renderer for the game page.
#[derive(Debug, Clone)]
pub struct BoardView {
    grid_size: usize,
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

impl BoardView {
    pub fn new(grid_size: usize) -> Self {
        // 10 columns fit four wide glyphs ("貳零肆捌") with a margin.
        Self {
            grid_size: grid_size.min(MAX_GRID_SIZE),
            cell_w: 10,
            cell_h: 3,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_cell_size(mut self, cell_w: u16, cell_h: u16) -> Self {
        self.cell_w = cell_w.max(1);
        self.cell_h = cell_h.max(1);
        self
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Outer size of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        let n = u16::try_from(self.grid_size).unwrap_or(u16::MAX);
        (
            n.saturating_mul(self.cell_w).saturating_add(2),
            n.saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    /// Render the page into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, doc: &Document, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(DARK_TEXT, PAGE_BG).into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(BOARD_BG, PAGE_BG);
        fb.fill_rect(
            start_x.saturating_add(1),
            start_y.saturating_add(1),
            frame_w.saturating_sub(2),
            frame_h.saturating_sub(2),
            ' ',
            CellStyle::new(DARK_TEXT, BOARD_BG),
        );
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for x in 0..self.grid_size {
            for y in 0..self.grid_size {
                self.draw_empty_cell(fb, start_x, start_y, Position::new(x, y));
            }
        }

        // Later wrappers paint over earlier ones: merge sources sit under the result.
        for tile in read_tiles(doc) {
            if tile.position.x >= self.grid_size || tile.position.y >= self.grid_size {
                continue;
            }
            self.draw_tile(fb, start_x, start_y, &tile);
        }

        self.draw_side_panel(fb, doc, viewport, start_x, start_y, frame_w);

        if let Some((text, won)) = message_overlay(doc) {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, &text, won);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, doc: &Document, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(doc, viewport, &mut fb);
        fb
    }

    fn cell_origin(&self, start_x: u16, start_y: u16, pos: Position) -> (u16, u16) {
        let x = u16::try_from(pos.x).unwrap_or(u16::MAX);
        let y = u16::try_from(pos.y).unwrap_or(u16::MAX);
        (
            start_x.saturating_add(1).saturating_add(x.saturating_mul(self.cell_w)),
            start_y.saturating_add(1).saturating_add(y.saturating_mul(self.cell_h)),
        )
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '╭', style);
        fb.put_char(x + w - 1, y, '╮', style);
        fb.put_char(x, y + h - 1, '╰', style);
        fb.put_char(x + w - 1, y + h - 1, '╯', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, pos: Position) {
        let (px, py) = self.cell_origin(start_x, start_y, pos);
        let style = CellStyle::new(BOARD_BG, EMPTY_CELL_BG);
        self.fill_inset(fb, px, py, style);
        fb.put_char(
            px.saturating_add(self.cell_w / 2),
            py.saturating_add(self.cell_h / 2),
            '·',
            style,
        );
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, tile: &TileMarkup) {
        let (px, py) = self.cell_origin(start_x, start_y, tile.position);
        let (bg, fg) = tile_colors(tile.value, tile.is_super);
        let mut style = CellStyle::new(fg, bg);
        if tile.is_merged || tile.is_super {
            style = style.bold();
        }
        self.fill_inset(fb, px, py, style);

        let inner_w = self.cell_w.saturating_sub(2).max(1);
        let text = if str_width(&tile.text) > inner_w {
            // Too long for the cell: keep the most significant glyphs.
            truncate_to_width(&tile.text, inner_w)
        } else {
            tile.text.clone()
        };
        fb.put_str_centered(
            px.saturating_add(1),
            py.saturating_add(self.cell_h / 2),
            inner_w,
            &text,
            style,
        );

        if tile.is_new && self.cell_h >= 3 && self.cell_w >= 3 {
            fb.put_char(px.saturating_add(self.cell_w - 2), py, '*', style.dim());
        }
    }

    /// Fill a cell leaving a one-column gutter on the right.
    fn fill_inset(&self, fb: &mut FrameBuffer, px: u16, py: u16, style: CellStyle) {
        let w = if self.cell_w > 2 { self.cell_w - 1 } else { self.cell_w };
        fb.fill_rect(px, py, w, self.cell_h, ' ', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        doc: &Document,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(238, 228, 218), BOARD_BG).bold();
        let value = CellStyle::new(DARK_TEXT, PAGE_BG).bold();
        let gain = CellStyle::new(Rgb::new(119, 110, 101), PAGE_BG).dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, " SCORE ", label);
        y = y.saturating_add(1);
        if let Some(score) = doc.query_selector(&format!(".{}", classes::SCORE_CONTAINER)) {
            fb.put_str(panel_x, y, doc.text(score), value);
            let addition = doc
                .find_descendant(score, &format!(".{}", classes::SCORE_ADDITION))
                .map(|el| doc.text_content(el));
            if let Some(addition) = addition {
                fb.put_str(panel_x, y.saturating_add(1), &addition, gain);
            }
        }
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, " BEST ", label);
        y = y.saturating_add(1);
        if let Some(best) = doc.query_selector(&format!(".{}", classes::BEST_CONTAINER)) {
            fb.put_str(panel_x, y, &doc.text_content(best), value);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
        won: bool,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let bg = if won {
            Rgb::new(237, 194, 46)
        } else {
            Rgb::new(238, 228, 218)
        };
        let fg = if won { LIGHT_TEXT } else { DARK_TEXT };
        let style = CellStyle::new(fg, bg).bold();
        let band_w = str_width(text).saturating_add(6).min(frame_w.saturating_sub(2));
        let band_x = start_x
            .saturating_add(1)
            .saturating_add(frame_w.saturating_sub(2).saturating_sub(band_w) / 2);
        fb.fill_rect(band_x, mid_y, band_w, 1, ' ', style);
        fb.put_str_centered(band_x, mid_y, band_w, text, style);
    }
}

/// Message text and outcome when the message region is showing.
fn message_overlay(doc: &Document) -> Option<(String, bool)> {
    let region = doc.query_selector(&format!(".{}", classes::GAME_MESSAGE))?;
    let won = doc.has_class(region, classes::GAME_WON);
    if !won && !doc.has_class(region, classes::GAME_OVER) {
        return None;
    }
    let text = doc
        .find_descendant(region, "p")
        .map(|p| doc.text_content(p))
        .unwrap_or_default();
    Some((text, won))
}

fn truncate_to_width(s: &str, max: u16) -> String {
    let mut out = String::new();
    let mut w = 0u16;
    for ch in s.chars() {
        let cw = crate::fb::char_width(ch);
        if w + cw > max {
            break;
        }
        out.push(ch);
        w += cw;
    }
    out
}
