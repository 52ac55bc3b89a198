//! `OutputBuffer`: single-syscall output buffer for ANSI sequences.

use crate::buffer::{Buffer, Modifiers, Rgb, Style};
use std::io::{self, Write};

/// SGR parameters for each modifier, in emission order.
const MODIFIER_SGR: [(Modifiers, &[u8]); 5] = [
    (Modifiers::BOLD, b"\x1b[1m"),
    (Modifiers::DIM, b"\x1b[2m"),
    (Modifiers::ITALIC, b"\x1b[3m"),
    (Modifiers::UNDERLINE, b"\x1b[4m"),
    (Modifiers::REVERSED, b"\x1b[7m"),
];

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// A frame is accumulated here, then flushed in a single `write()` syscall
/// so the terminal never shows a half-painted reply.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (16KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The accumulated bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of accumulated bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been accumulated.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Move cursor to (x, y), 0-indexed.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting into the buffer fails.
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) -> io::Result<()> {
        // CSI row ; col H
        write!(self.data, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Set foreground color (true color).
    ///
    /// # Errors
    ///
    /// Returns an error if formatting into the buffer fails.
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) -> io::Result<()> {
        write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
    }

    /// Set background color (true color).
    ///
    /// # Errors
    ///
    /// Returns an error if formatting into the buffer fails.
    #[inline]
    pub fn set_bg(&mut self, color: Rgb) -> io::Result<()> {
        write!(self.data, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Switch to `style` from whatever was active.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting into the buffer fails.
    pub fn set_style(&mut self, style: Style) -> io::Result<()> {
        self.reset_attrs();
        self.set_fg(style.fg)?;
        self.set_bg(style.bg)?;
        for (modifier, sgr) in MODIFIER_SGR {
            if style.modifiers.contains(modifier) {
                self.data.extend_from_slice(sgr);
            }
        }
        Ok(())
    }

    /// Append a full-frame repaint of `buffer`.
    ///
    /// Every row is addressed explicitly and SGR is emitted only when the
    /// style changes between cells. Wide continuation cells are skipped since
    /// the terminal advances past them on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting into the buffer fails.
    pub fn paint(&mut self, buffer: &Buffer) -> io::Result<()> {
        self.cursor_hide();
        let mut active: Option<Style> = None;

        for y in 0..buffer.height() {
            self.cursor_move(0, y)?;
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                if cell.is_wide_continuation() {
                    continue;
                }
                let style = cell.style();
                if active != Some(style) {
                    self.set_style(style)?;
                    active = Some(style);
                }
                let grapheme = buffer.get_grapheme(x, y).unwrap_or(" ");
                self.data.extend_from_slice(grapheme.as_bytes());
            }
        }

        self.reset_attrs();
        Ok(())
    }

    /// Flush to a writer in a single syscall and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()?;
        self.data.clear();
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
