//! # Typecast
//!
//! Incremental markdown rendering with a typewriter reveal, for AI chat
//! replies in the terminal.
//!
//! A reply is revealed one character at a time. On every tick the visible
//! prefix is re-parsed into blocks, so half-typed structure (an open code
//! fence, an unterminated `**`) renders sensibly mid-stream and settles into
//! its final shape once the closing markup arrives.
//!
//! ## Core Concepts
//!
//! - **Block parsing**: headings, lists, code fences and paragraphs from a
//!   small markdown dialect ([`markdown`])
//! - **Generation-stamped reveal**: a new text supersedes the old reveal and
//!   its late ticks are dropped ([`reveal`])
//! - **Cell grid painting**: laid-out lines are painted into a [`Buffer`] and
//!   flushed as one ANSI frame ([`widget`], [`terminal`])
//!
//! ## Example
//!
//! ```
//! use typecast::reveal::render;
//! use typecast::markdown::Block;
//!
//! let blocks = render("```python\nprint(1)\n```", 13);
//! match &blocks[0] {
//!     Block::Code(code) => {
//!         assert_eq!(code.language, "PYTHON");
//!         assert!(!code.complete);
//!     }
//!     other => panic!("expected code, got {other:?}"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod clipboard;
pub mod error;
pub mod layout;
pub mod markdown;
pub mod metrics;
pub mod reveal;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use buffer::{Buffer, Cell, CellFlags, Modifiers, Rgb, Style};
pub use clipboard::{Clipboard, CopyTracker, MemoryClipboard, SystemClipboard};
pub use error::{ClipboardError, Error, Result};
pub use layout::Rect;
pub use markdown::{parse_blocks, parse_spans, Block, CodeBlock, CodeBlockId, Span};
pub use metrics::{extract_metrics, IdeaMetrics};
pub use reveal::{render, RevealConfig, Typewriter};
pub use terminal::{OutputBuffer, SessionConfig, TerminalSession};
pub use widget::{MessageWidget, Theme, Transcript, TranscriptConfig};
