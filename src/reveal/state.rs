//! Reveal state: how much of one text is currently visible.

use std::fmt;

/// Identity of one reveal.
///
/// Every time a typewriter is handed a different text it starts a new
/// generation. Ticks carry the generation they were scheduled for, so a tick
/// that outlives its reveal can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// What a tick did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to a superseded reveal; nothing changed.
    Stale,
    /// More characters are visible, and more remain hidden.
    Advanced {
        /// Characters visible after the tick.
        displayed: usize,
    },
    /// This tick revealed the last character.
    Finished,
    /// The reveal was already complete; nothing changed.
    Complete,
}

/// Byte offset of the `chars`-th character of `text`, clamped to its length.
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}

/// The first `chars` characters of `text`.
///
/// Counts characters rather than bytes, so the prefix never ends inside a
/// multi-byte code point.
pub fn prefix(text: &str, chars: usize) -> &str {
    &text[..byte_offset(text, chars)]
}

/// Mutable reveal progress over an immutable text.
///
/// `displayed` only grows, and once it reaches the character count of the
/// text the state is terminal.
#[derive(Debug, Clone)]
pub struct RevealState {
    text: String,
    generation: Generation,
    total_chars: usize,
    shown_chars: usize,
    shown_bytes: usize,
}

impl RevealState {
    /// Start a reveal at zero visible characters.
    pub fn new(text: impl Into<String>, generation: Generation) -> Self {
        let text = text.into();
        let total_chars = text.chars().count();
        Self {
            text,
            generation,
            total_chars,
            shown_chars: 0,
            shown_bytes: 0,
        }
    }

    /// A state whose whole text is already visible.
    pub fn instant(text: impl Into<String>, generation: Generation) -> Self {
        let mut state = Self::new(text, generation);
        state.reveal_all();
        state
    }

    /// Apply one tick revealing up to `step` more characters.
    ///
    /// A tick stamped with any generation other than this state's is ignored.
    pub fn advance(&mut self, generation: Generation, step: usize) -> TickOutcome {
        if generation != self.generation {
            return TickOutcome::Stale;
        }
        if self.is_complete() {
            return TickOutcome::Complete;
        }

        let step = step.max(1).min(self.total_chars - self.shown_chars);
        let rest = &self.text[self.shown_bytes..];
        self.shown_bytes += byte_offset(rest, step);
        self.shown_chars += step;

        if self.is_complete() {
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced {
                displayed: self.shown_chars,
            }
        }
    }

    /// Move to `generation` keeping the visible prefix.
    ///
    /// Ticks stamped with the previous generation become stale.
    pub fn restamp(&mut self, generation: Generation) {
        self.generation = generation;
    }

    /// Make the whole text visible.
    pub fn reveal_all(&mut self) {
        self.shown_chars = self.total_chars;
        self.shown_bytes = self.text.len();
    }

    /// The full target text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The currently visible prefix.
    pub fn visible(&self) -> &str {
        &self.text[..self.shown_bytes]
    }

    /// Generation this state belongs to.
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Characters currently visible.
    pub const fn displayed_len(&self) -> usize {
        self.shown_chars
    }

    /// Characters in the full text.
    pub const fn total_len(&self) -> usize {
        self.total_chars
    }

    /// Characters still hidden.
    pub const fn remaining(&self) -> usize {
        self.total_chars - self.shown_chars
    }

    /// Whether everything is visible.
    pub const fn is_complete(&self) -> bool {
        self.shown_chars == self.total_chars
    }
}
