//! Framebuffer and style types for terminal rendering.
//!
//! Wide glyphs (kanji numerals) occupy two columns: the glyph sits in the
//! left cell and the right cell holds [`CONTINUATION`]. Writes that cut a wide
//! glyph in half blank its other half, so the buffer never holds an orphaned
//! half.

use unicode_width::UnicodeWidthChar;

/// Marker stored in the right half of a wide glyph.
pub const CONTINUATION: char = '\0';

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(119, 110, 101),
            bg: Rgb::new(250, 248, 239),
            bold: false,
            dim: false,
        }
    }
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

impl Cell {
    pub fn is_continuation(&self) -> bool {
        self.ch == CONTINUATION
    }
}

/// Display width of a character in terminal columns.
pub fn char_width(ch: char) -> u16 {
    if ch == CONTINUATION {
        return 0;
    }
    ch.width().unwrap_or(0).min(2) as u16
}

/// Display width of a string in terminal columns.
pub fn str_width(s: &str) -> u16 {
    s.chars().map(char_width).fold(0u16, u16::saturating_add)
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are unspecified
    /// afterwards; callers clear before drawing.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.unlink(x, y);
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write one glyph; returns the number of columns it took (0 if it did not fit).
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) -> u16 {
        match char_width(ch) {
            0 => 0,
            1 => {
                if self.idx(x, y).is_none() {
                    return 0;
                }
                self.set(x, y, Cell { ch, style });
                1
            }
            _ => {
                let (Some(i), Some(j)) = (self.idx(x, y), self.idx(x.saturating_add(1), y)) else {
                    return 0;
                };
                self.unlink(x, y);
                self.unlink(x + 1, y);
                self.cells[i] = Cell { ch, style };
                self.cells[j] = Cell {
                    ch: CONTINUATION,
                    style,
                };
                2
            }
        }
    }

    /// Write a string left to right, stopping at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            let w = char_width(ch);
            if w == 0 {
                continue;
            }
            if self.put_char(cx, y, ch, style) == 0 {
                break;
            }
            cx = cx.saturating_add(w);
        }
    }

    /// Write a string centered within `[x, x + w)`.
    pub fn put_str_centered(&mut self, x: u16, y: u16, w: u16, s: &str, style: CellStyle) {
        let text_w = str_width(s);
        let cx = x.saturating_add(w.saturating_sub(text_w) / 2);
        self.put_str(cx, y, s, style);
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        // Clipped to the buffer.
        let w = w.min(self.width.saturating_sub(x));
        let h = h.min(self.height.saturating_sub(y));
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Blank the other half of a wide glyph occupying `(x, y)`.
    fn unlink(&mut self, x: u16, y: u16) {
        let Some(i) = self.idx(x, y) else {
            return;
        };
        let cur = self.cells[i];
        if cur.is_continuation() {
            if x > 0 {
                self.cells[i - 1].ch = ' ';
            }
        } else if char_width(cur.ch) == 2 {
            if let Some(j) = self.idx(x.saturating_add(1), y) {
                if j != i && self.cells[j].is_continuation() {
                    self.cells[j].ch = ' ';
                }
            }
        }
    }

    /// Text of row `y` with continuation cells dropped. Handy in tests.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut fb = FrameBuffer::new(4, 2);
        let style = CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(1, 1, 1));
        fb.fill_rect(2, 1, u16::MAX, u16::MAX, '#', style);
        let filled: Vec<char> = fb.cells().iter().map(|c| c.ch).collect();
        assert_eq!(filled, vec![' ', ' ', ' ', ' ', ' ', ' ', '#', '#']);
        fb.fill_rect(u16::MAX, u16::MAX, 3, 3, '@', style);
        assert!(fb.cells().iter().all(|c| c.ch != '@'));
    }

    #[test]
    fn wide_glyph_takes_two_cells() {
        let mut fb = FrameBuffer::new(6, 1);
        fb.put_str(0, 0, "貳a", CellStyle::default());

        assert_eq!(fb.get(0, 0).unwrap().ch, '貳');
        assert!(fb.get(1, 0).unwrap().is_continuation());
        assert_eq!(fb.get(2, 0).unwrap().ch, 'a');
        assert_eq!(fb.row_text(0), "貳a   ");
    }

    #[test]
    fn wide_glyph_at_right_edge_is_dropped() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "a貳肆", CellStyle::default());
        assert_eq!(fb.row_text(0), "a貳");

        let mut fb = FrameBuffer::new(2, 1);
        fb.put_str(1, 0, "肆", CellStyle::default());
        assert_eq!(fb.row_text(0), "  ");
    }

    #[test]
    fn overwriting_half_a_glyph_blanks_the_other_half() {
        let style = CellStyle::default();
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "壹", style);
        fb.put_char(1, 0, 'x', style);
        assert_eq!(fb.row_text(0), " x  ");

        fb.put_str(2, 0, "壹", style);
        fb.put_char(2, 0, 'y', style);
        assert_eq!(fb.row_text(0), " xy ");
        assert!(!fb.get(3, 0).unwrap().is_continuation());
    }

    #[test]
    fn centered_text_uses_display_width() {
        let mut fb = FrameBuffer::new(8, 1);
        fb.put_str_centered(0, 0, 8, "貳零", CellStyle::default());
        assert_eq!(fb.get(2, 0).unwrap().ch, '貳');
        assert_eq!(fb.get(4, 0).unwrap().ch, '零');
    }

    #[test]
    fn str_width_counts_wide_glyphs_twice() {
        assert_eq!(str_width("2048"), 4);
        assert_eq!(str_width("貳零肆捌"), 8);
        assert_eq!(str_width("+壹"), 3);
    }
}
