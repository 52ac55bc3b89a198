//! Cell: one styled grapheme in the render grid.
//!
//! A cell is 16 bytes. Graphemes of up to 4 UTF-8 bytes are stored inline;
//! longer clusters (emoji with variation selectors or ZWJ sequences, which
//! AI replies use liberally in headings) spill into the owning
//! [`Buffer`](super::Buffer) and the cell keeps an index instead.

use bitflags::bitflags;

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., `0x10B981`).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// # Example
    /// ```
    /// use typecast::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::UNDERLINE;
    /// assert!(style.contains(Modifiers::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

bitflags! {
    /// Cell-level flags for special states.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Grapheme overflows inline storage; look it up in the buffer
        const OVERFLOW = 0b0000_0001;
        /// This cell is the right half of a wide character
        const WIDE_CONTINUATION = 0b0000_0100;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Colors and modifiers applied to a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// A style with the given colors and no modifiers.
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// Replace the foreground color.
    #[must_use]
    pub const fn fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Replace the background color.
    #[must_use]
    pub const fn bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Add modifiers.
    #[must_use]
    pub const fn add(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Rgb::WHITE, Rgb::BLACK)
    }
}

/// A single grid cell.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Cell {
    /// Inline grapheme storage (UTF-8 bytes), or a little-endian overflow index.
    grapheme: [u8; 4],
    /// Byte length of the inline grapheme (0 when overflowed).
    grapheme_len: u8,
    /// Display width (0=continuation, 1=normal, 2=wide).
    display_width: u8,
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
    flags: CellFlags,
    _padding: [u8; 2],
}

const _: () = assert!(std::mem::size_of::<Cell>() == 16, "Cell must be 16 bytes");

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// A space with default colors.
    pub const EMPTY: Self = Self::blank(Style::new(Rgb::WHITE, Rgb::BLACK));

    /// A space painted with `style`.
    pub const fn blank(style: Style) -> Self {
        Self {
            grapheme: [b' ', 0, 0, 0],
            grapheme_len: 1,
            display_width: 1,
            fg: style.fg,
            bg: style.bg,
            modifiers: style.modifiers,
            flags: CellFlags::empty(),
            _padding: [0, 0],
        }
    }

    /// Create a cell from a grapheme that fits inline.
    ///
    /// Returns `None` when the grapheme is longer than 4 bytes and needs
    /// overflow storage.
    pub fn from_grapheme(s: &str, style: Style) -> Option<Self> {
        let bytes = s.as_bytes();
        let len = u8::try_from(bytes.len()).ok().filter(|&l| l <= 4)?;

        let mut grapheme = [0u8; 4];
        grapheme[..bytes.len()].copy_from_slice(bytes);
        let width = u8::try_from(unicode_width::UnicodeWidthStr::width(s)).unwrap_or(1);

        Some(Self {
            grapheme,
            grapheme_len: len,
            display_width: width,
            fg: style.fg,
            bg: style.bg,
            modifiers: style.modifiers,
            flags: CellFlags::empty(),
            _padding: [0, 0],
        })
    }

    /// Create an overflow cell pointing at external storage.
    pub const fn overflow(index: u32, display_width: u8, style: Style) -> Self {
        Self {
            grapheme: index.to_le_bytes(),
            grapheme_len: 0,
            display_width,
            fg: style.fg,
            bg: style.bg,
            modifiers: style.modifiers,
            flags: CellFlags::OVERFLOW,
            _padding: [0, 0],
        }
    }

    /// The right half of a wide character.
    pub const fn wide_continuation(style: Style) -> Self {
        Self {
            grapheme: [0, 0, 0, 0],
            grapheme_len: 0,
            display_width: 0,
            fg: style.fg,
            bg: style.bg,
            modifiers: style.modifiers,
            flags: CellFlags::WIDE_CONTINUATION,
            _padding: [0, 0],
        }
    }

    /// The inline grapheme, or `None` for overflow and continuation cells.
    pub fn grapheme(&self) -> Option<&str> {
        if self.flags.intersects(CellFlags::OVERFLOW | CellFlags::WIDE_CONTINUATION) {
            return None;
        }
        std::str::from_utf8(&self.grapheme[..self.grapheme_len as usize]).ok()
    }

    /// The overflow index if this is an overflow cell.
    #[inline]
    pub const fn overflow_index(&self) -> Option<u32> {
        if self.flags.contains(CellFlags::OVERFLOW) {
            Some(u32::from_le_bytes(self.grapheme))
        } else {
            None
        }
    }

    /// Whether this is the right half of a wide character.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Display width (0, 1, or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.display_width
    }

    /// The cell's style.
    #[inline]
    pub const fn style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            modifiers: self.modifiers,
        }
    }

    /// Foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Text modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.grapheme == other.grapheme
            && self.grapheme_len == other.grapheme_len
            && self.fg == other.fg
            && self.bg == other.bg
            && self.modifiers == other.modifiers
            && self.flags == other.flags
            && self.display_width == other.display_width
    }
}

impl Eq for Cell {}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let grapheme = self.grapheme().unwrap_or("<external>");
        f.debug_struct("Cell")
            .field("grapheme", &grapheme)
            .field("width", &self.display_width)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}
