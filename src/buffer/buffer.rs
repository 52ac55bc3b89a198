//! Buffer: a grid of cells a message or transcript is painted into.
//!
//! Cells are stored contiguously in row-major order.

use super::cell::{Cell, Style};
use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

/// A grid of cells.
///
/// Access is row-major: `index = y * width + x`. Graphemes longer than four
/// bytes live in a side table keyed by the index stored in their cell.
#[derive(Clone)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
    overflow: HashMap<u32, String>,
    next_overflow_index: u32,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
            overflow: HashMap::new(),
            next_overflow_index: 0,
        }
    }

    /// Buffer width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Convert (x, y) to a linear index, or `None` when out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// The cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Overwrite the cell at (x, y). Returns `false` when out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Paint a grapheme at (x, y).
    ///
    /// Wide graphemes also claim (x+1, y) as a continuation cell. Returns the
    /// display width written, or 0 when out of bounds.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_grapheme(&mut self, x: u16, y: u16, grapheme: &str, style: Style) -> u8 {
        let Some(idx) = self.index_of(x, y) else {
            return 0;
        };

        let width = UnicodeWidthStr::width(grapheme).min(2) as u8;

        let cell = Cell::from_grapheme(grapheme, style).unwrap_or_else(|| {
            let overflow_idx = self.next_overflow_index;
            self.next_overflow_index += 1;
            self.overflow.insert(overflow_idx, grapheme.to_string());
            Cell::overflow(overflow_idx, width, style)
        });
        self.cells[idx] = cell;

        if width == 2 {
            if let Some(next_idx) = self.index_of(x + 1, y) {
                self.cells[next_idx] = Cell::wide_continuation(style);
            }
        }

        width
    }

    /// The grapheme at (x, y), including overflow lookup.
    ///
    /// Returns `None` if out of bounds or on a continuation cell.
    pub fn get_grapheme(&self, x: u16, y: u16) -> Option<&str> {
        let cell = self.get(x, y)?;
        if cell.is_wide_continuation() {
            return None;
        }
        match cell.overflow_index() {
            Some(idx) => self.overflow.get(&idx).map(String::as_str),
            None => cell.grapheme(),
        }
    }

    /// Fill a rectangular region with a cell.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, cell: Cell) {
        for row in y..y.saturating_add(height).min(self.height) {
            for col in x..x.saturating_add(width).min(self.width) {
                if let Some(idx) = self.index_of(col, row) {
                    self.cells[idx] = cell;
                }
            }
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
        self.overflow.clear();
        self.next_overflow_index = 0;
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// The text of row `y` with trailing blanks trimmed.
    ///
    /// Continuation cells are skipped so wide characters appear once.
    pub fn row_text(&self, y: u16) -> String {
        let mut text = String::new();
        for x in 0..self.width {
            if let Some(g) = self.get_grapheme(x, y) {
                text.push_str(g);
            }
        }
        text.trim_end().to_string()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("overflow_count", &self.overflow.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_buffer_zero_width() {
        Buffer::new(0, 24);
    }

    #[test]
    fn test_buffer_bounds() {
        let mut buffer = Buffer::new(10, 2);
        assert!(buffer.get(9, 1).is_some());
        assert!(buffer.get(10, 1).is_none());
        assert_eq!(buffer.set_grapheme(10, 0, "x", Style::default()), 0);
    }

    #[test]
    fn test_wide_grapheme_claims_two_cells() {
        let mut buffer = Buffer::new(10, 1);
        assert_eq!(buffer.set_grapheme(0, 0, "日", Style::default()), 2);
        assert!(buffer.get(1, 0).unwrap().is_wide_continuation());
        assert_eq!(buffer.row_text(0), "日");
    }

    #[test]
    fn test_overflow_grapheme_round_trips() {
        let mut buffer = Buffer::new(10, 1);
        let emoji = "👨‍👩‍👧";
        buffer.set_grapheme(2, 0, emoji, Style::default());
        assert_eq!(buffer.get_grapheme(2, 0), Some(emoji));
    }

    #[test]
    fn test_fill_and_clear() {
        let mut buffer = Buffer::new(4, 4);
        let accent = Cell::blank(Style::default().bg(Rgb::from_u32(0x10B981)));
        buffer.fill_rect(1, 1, 10, 10, accent);
        assert_eq!(buffer.get(3, 3), Some(&accent));
        assert_eq!(buffer.get(0, 0), Some(&Cell::EMPTY));
        buffer.clear();
        assert_eq!(buffer.get(3, 3), Some(&Cell::EMPTY));
    }
}
