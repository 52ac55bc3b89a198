//! Error types.
//!
//! Parsing and revealing are total and never fail. Errors only come from the
//! edges: the platform clipboard and the terminal writer.

use thiserror::Error;

/// Clipboard operation errors.
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// OSC 52 write failed.
    #[error("OSC 52 clipboard failed: {0}")]
    Osc52(String),

    /// System clipboard operation failed.
    #[error("System clipboard failed: {0}")]
    System(String),
}

/// Crate-level error.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while writing to the terminal.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Copying a code block failed.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// Result type for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
