//! Layout module: screen rectangles widgets paint into.

mod rect;

pub use rect::Rect;
