//! Reveal: character-by-character "typing" of a reply.
//!
//! The reveal is split into three layers:
//!
//! - [`RevealState`]: pure progress over one text, advanced by ticks
//! - [`RevealTicker`]: a thread that paces ticks for one reveal
//! - [`Typewriter`]: owns both and exposes the visible prefix and its blocks
//!
//! ```text
//! ┌──────────────┐   Tick { generation }   ┌──────────────┐   prefix   ┌──────────────┐
//! │ RevealTicker │ ──────────────────────▶ │  Typewriter  │ ─────────▶ │ parse_blocks │
//! └──────────────┘     crossbeam channel   └──────────────┘            └──────────────┘
//! ```
//!
//! Every tick carries the [`Generation`] of the reveal it was scheduled for.
//! A typewriter that has moved on to another text drops such ticks instead
//! of applying them.

mod state;
mod ticker;
mod typewriter;

pub use state::{prefix, Generation, RevealState, TickOutcome};
pub use ticker::{RevealTicker, Tick};
pub use typewriter::{RevealConfig, Typewriter};

use crate::markdown::{parse_blocks, Block};

/// Blocks for the first `displayed_len` characters of `text`.
///
/// This is the timer-free mapping a reveal performs on every tick.
pub fn render(text: &str, displayed_len: usize) -> Vec<Block> {
    parse_blocks(prefix(text, displayed_len))
}
