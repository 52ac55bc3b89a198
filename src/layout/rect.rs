//! Rect: the screen area a widget paints into.

/// A rectangle defined by position and size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: u16,
    /// Y coordinate (row) of the top-left corner.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// The whole terminal.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Whether the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Shrink by `dx` columns left and right, `dy` rows top and bottom.
    #[must_use]
    pub const fn inset(&self, dx: u16, dy: u16) -> Self {
        if self.width <= dx * 2 || self.height <= dy * 2 {
            return Self::ZERO;
        }
        Self::new(self.x + dx, self.y + dy, self.width - dx * 2, self.height - dy * 2)
    }

    /// Split off `rows` rows at the bottom, for an input or status line.
    pub fn split_bottom(&self, rows: u16) -> (Self, Self) {
        let rows = rows.min(self.height);
        let top = self.height - rows;
        (
            Self::new(self.x, self.y, self.width, top),
            Self::new(self.x, self.y + top, self.width, rows),
        )
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset() {
        let rect = Rect::from_size(80, 24).inset(2, 1);
        assert_eq!(rect, Rect::new(2, 1, 76, 22));
        assert!(Rect::new(0, 0, 3, 3).inset(2, 2).is_empty());
    }

    #[test]
    fn test_split_bottom() {
        let (body, footer) = Rect::from_size(80, 24).split_bottom(1);
        assert_eq!(body, Rect::new(0, 0, 80, 23));
        assert_eq!(footer, Rect::new(0, 23, 80, 1));
        assert_eq!(footer.bottom(), 24);

        let (body, footer) = Rect::from_size(10, 2).split_bottom(5);
        assert!(body.is_empty());
        assert_eq!(footer.height, 2);
    }
}
