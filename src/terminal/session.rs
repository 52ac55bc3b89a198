//! Terminal session: raw mode and alternate screen for a live transcript.

use super::output::OutputBuffer;
use crate::buffer::Buffer;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Configuration for a [`TerminalSession`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Initial capacity of the frame buffer in bytes.
    pub frame_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            frame_capacity: 16 * 1024,
        }
    }
}

/// Owns the terminal while a transcript is on screen.
///
/// Entering switches to raw mode (and optionally the alternate screen);
/// dropping the session restores the terminal, also on early return.
pub struct TerminalSession {
    config: SessionConfig,
    output: OutputBuffer,
    width: u16,
    height: u16,
}

impl TerminalSession {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn enter(config: SessionConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        prepare(&mut io::stdout(), &config, set_raw_mode)?;
        debug!(width, height, "terminal session entered");

        let output = OutputBuffer::with_capacity(config.frame_capacity);
        Ok(Self {
            config,
            output,
            width: width.max(1),
            height: height.max(1),
        })
    }

    /// Current terminal size as (width, height).
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Record a new terminal size. Returns `true` if it changed.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == (self.width, self.height) {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    /// A fresh buffer matching the terminal size.
    pub fn buffer(&self) -> Buffer {
        Buffer::new(self.width, self.height)
    }

    /// Paint `buffer` as one frame and flush it in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn present(&mut self, buffer: &Buffer) -> io::Result<()> {
        self.output.clear();
        self.output.paint(buffer)?;
        self.output.flush_to(&mut io::stdout())
    }
}

fn set_raw_mode(enabled: bool) -> io::Result<()> {
    if enabled {
        terminal::enable_raw_mode()
    } else {
        terminal::disable_raw_mode()
    }
}

fn enter_screen(out: &mut impl Write, config: &SessionConfig) -> io::Result<()> {
    if config.alternate_screen {
        execute!(out, EnterAlternateScreen)?;
    }
    execute!(out, cursor::Hide)
}

/// Enable raw mode and set up the screen, undoing raw mode if setup fails.
fn prepare(
    out: &mut impl Write,
    config: &SessionConfig,
    mut raw_mode: impl FnMut(bool) -> io::Result<()>,
) -> io::Result<()> {
    raw_mode(true)?;
    if let Err(err) = enter_screen(out, config) {
        warn!(error = %err, "terminal setup failed, leaving raw mode");
        if config.alternate_screen {
            let _ = execute!(out, LeaveAlternateScreen);
        }
        let _ = raw_mode(false);
        return Err(err);
    }
    Ok(())
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        self.output.clear();
        self.output.reset_attrs();
        self.output.cursor_show();
        let _ = self.output.flush_to(&mut stdout);
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        debug!("terminal session restored");
    }
}
