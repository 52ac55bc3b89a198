//! Buffer module: the cell grid replies are painted into.
//!
//! - [`Cell`]: one styled grapheme, 16 bytes
//! - [`Buffer`]: a grid of cells with overflow storage for long graphemes
//! - [`Style`], [`Rgb`], [`Modifiers`]: text styling

mod cell;
#[allow(clippy::module_inception)]
mod buffer;

pub use buffer::Buffer;
pub use cell::{Cell, CellFlags, Modifiers, Rgb, Style};
