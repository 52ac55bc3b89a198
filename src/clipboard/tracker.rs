//! Copy tracker: the transient "copied" indicator.

use super::Clipboard;
use crate::error::ClipboardError;
use crate::markdown::{CodeBlock, CodeBlockId};
use std::fmt::Debug;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long a code block shows as copied.
pub const DEFAULT_COPY_HOLD: Duration = Duration::from_millis(2000);

/// Remembers which code block was just copied, until its hold expires.
///
/// Only one block is marked at a time. Copying another block replaces the
/// mark and its deadline, which cancels the pending revert of the first.
/// The key defaults to [`CodeBlockId`]; a transcript keys by message too.
#[derive(Debug, Clone)]
pub struct CopyTracker<K = CodeBlockId> {
    hold: Duration,
    active: Option<(K, Instant)>,
}

impl<K> Default for CopyTracker<K> {
    fn default() -> Self {
        Self::new(DEFAULT_COPY_HOLD)
    }
}

impl<K> CopyTracker<K> {
    /// Create a tracker with a custom hold duration.
    pub const fn new(hold: Duration) -> Self {
        Self { hold, active: None }
    }

    /// The hold duration.
    pub const fn hold(&self) -> Duration {
        self.hold
    }

    /// Drop an expired mark. Returns `true` if the indicator reverted.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.active {
            Some((_, until)) if now >= until => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// When the current mark reverts, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.active.as_ref().map(|&(_, until)| until)
    }

    /// Clear the mark immediately.
    pub fn clear(&mut self) {
        self.active = None;
    }
}

impl<K: Copy + Eq + Debug> CopyTracker<K> {
    /// Copy `content` and mark `key` as copied.
    ///
    /// On failure the current mark is left untouched.
    pub fn copy(
        &mut self,
        clipboard: &mut dyn Clipboard,
        key: K,
        content: &str,
        now: Instant,
    ) -> Result<(), ClipboardError> {
        if let Err(err) = clipboard.set_text(content) {
            warn!(?key, error = %err, "copying code block failed");
            return Err(err);
        }

        if let Some((previous, _)) = self.active {
            if previous != key {
                debug!(?previous, ?key, "copy indicator superseded");
            }
        }
        self.active = Some((key, now + self.hold));
        Ok(())
    }

    /// Whether `key` currently shows as copied.
    pub fn is_copied(&self, key: K, now: Instant) -> bool {
        self.active(now) == Some(key)
    }

    /// The key currently showing as copied.
    pub fn active(&self, now: Instant) -> Option<K> {
        self.active
            .filter(|&(_, until)| now < until)
            .map(|(key, _)| key)
    }
}

impl CopyTracker<CodeBlockId> {
    /// Copy a code block's content and mark it by its id.
    pub fn copy_block(
        &mut self,
        clipboard: &mut dyn Clipboard,
        block: &CodeBlock,
        now: Instant,
    ) -> Result<(), ClipboardError> {
        self.copy(clipboard, block.id, &block.content, now)
    }
}
