//! Clipboard: copying code blocks out of a rendered reply.
//!
//! The platform clipboard is an external collaborator behind the
//! [`Clipboard`] trait. [`CopyTracker`] holds the transient "copied"
//! indicator for the most recently copied code block.

mod tracker;

pub use tracker::{CopyTracker, DEFAULT_COPY_HOLD};

use crate::error::ClipboardError;
use std::io::Write;
use tracing::warn;

/// A destination for copied text.
pub trait Clipboard {
    /// Place `text` on the clipboard.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard, with multiple transport fallbacks:
///
/// 1. OSC 52 terminal escape sequence (works over SSH)
/// 2. System clipboard via `arboard`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Copy using the OSC 52 escape sequence written to stdout, which the
    /// terminal intercepts.
    fn copy_osc52(text: &str) -> Result<(), ClipboardError> {
        use base64::Engine;

        let encoded = base64::engine::general_purpose::STANDARD.encode(text);

        // OSC 52 format: ESC ] 52 ; c ; <base64-data> ESC \
        let mut stdout = std::io::stdout();
        write!(stdout, "\x1b]52;c;{encoded}\x1b\\")
            .map_err(|e| ClipboardError::Osc52(e.to_string()))?;
        stdout
            .flush()
            .map_err(|e| ClipboardError::Osc52(e.to_string()))
    }

    fn copy_system(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::System(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::System(e.to_string()))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        match Self::copy_osc52(text) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, "OSC 52 copy failed, falling back to system clipboard");
                Self::copy_system(text)
            }
        }
    }
}

/// An in-process clipboard that keeps the last copied text.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub const fn new() -> Self {
        Self { contents: None }
    }

    /// The last copied text, if any.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
