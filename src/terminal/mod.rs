//! Terminal output: turning a painted [`Buffer`](crate::Buffer) into ANSI.
//!
//! - [`OutputBuffer`]: accumulates a frame and flushes it in one write
//! - [`TerminalSession`]: raw mode and alternate screen, restored on drop

mod output;
mod session;

pub use output::OutputBuffer;
pub use session::{SessionConfig, TerminalSession};
