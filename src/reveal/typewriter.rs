//! Typewriter: the reveal driver owned by one rendered message.

use super::state::{Generation, RevealState, TickOutcome};
use super::ticker::{RevealTicker, Tick};
use crate::markdown::{parse_blocks, Block};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for a typewriter reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    /// Delay per tick. Zero reveals the whole text at once.
    pub speed: Duration,
    /// Characters revealed per tick.
    ///
    /// Raising this coalesces work for very long texts, since every tick
    /// re-parses the whole visible prefix.
    pub chars_per_tick: usize,
}

impl RevealConfig {
    /// A configuration with the given per-character delay in milliseconds.
    pub const fn from_millis(speed_ms: u64) -> Self {
        Self {
            speed: Duration::from_millis(speed_ms),
            chars_per_tick: 1,
        }
    }

    /// A configuration that skips the animation.
    pub const fn instant() -> Self {
        Self::from_millis(0)
    }

    /// Whether reveals happen without animation.
    pub const fn is_instant(&self) -> bool {
        self.speed.is_zero()
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::from_millis(10)
    }
}

/// Drives the typewriter reveal of one text at a time.
///
/// The typewriter owns its [`RevealState`] exclusively and at most one live
/// [`RevealTicker`]. Handing it a different text supersedes the running
/// reveal: the old ticker is cancelled and any of its ticks still sitting in
/// the channel are dropped by generation when they are drained.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use typecast::reveal::{RevealConfig, Typewriter};
///
/// let mut typewriter = Typewriter::new(RevealConfig::from_millis(5));
/// typewriter.set_text("## Hello\n- world");
/// while !typewriter.is_complete() {
///     typewriter.wait(Duration::from_millis(50));
///     let _blocks = typewriter.blocks();
/// }
/// ```
pub struct Typewriter {
    config: RevealConfig,
    state: RevealState,
    ticker: Option<RevealTicker>,
    tick_tx: Sender<Tick>,
    tick_rx: Receiver<Tick>,
}

impl Typewriter {
    /// Create an idle typewriter with an empty, complete text.
    pub fn new(config: RevealConfig) -> Self {
        // Small buffer: ticks should not pile up behind a slow consumer
        let (tick_tx, tick_rx) = bounded(2);
        Self {
            config,
            state: RevealState::instant("", Generation::default()),
            ticker: None,
            tick_tx,
            tick_rx,
        }
    }

    /// Create a typewriter already revealing `text`.
    pub fn with_text(text: impl Into<String>, config: RevealConfig) -> Self {
        let mut typewriter = Self::new(config);
        typewriter.set_text(text);
        typewriter
    }

    /// Replace the text being revealed.
    ///
    /// Passing the text that is already being revealed does nothing, so a
    /// reveal in progress is never restarted by a redundant update.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.state.text() {
            return;
        }

        self.stop_ticker();
        let generation = self.state.generation().next();
        if !self.state.is_complete() {
            debug!(
                superseded = %self.state.generation(),
                %generation,
                "reveal superseded before completion"
            );
        }

        if self.config.is_instant() {
            self.state = RevealState::instant(text, generation);
        } else {
            self.state = RevealState::new(text, generation);
            self.start_ticker();
        }
    }

    /// Change the reveal speed.
    ///
    /// Switching to zero completes the current reveal immediately; any other
    /// change re-paces the remaining characters.
    pub fn set_speed(&mut self, speed: Duration) {
        if speed == self.config.speed {
            return;
        }
        self.config.speed = speed;

        if self.config.is_instant() {
            self.finish();
        } else if !self.state.is_complete() {
            self.stop_ticker();
            // ticks already queued at the old pace must not count
            let generation = self.state.generation().next();
            self.state.restamp(generation);
            self.start_ticker();
        }
    }

    /// Reveal everything now and stop the ticker.
    pub fn finish(&mut self) {
        self.stop_ticker();
        self.state.reveal_all();
    }

    /// Apply one tick. Returns `true` if the visible text changed.
    pub fn apply_tick(&mut self, tick: Tick) -> bool {
        match self
            .state
            .advance(tick.generation, self.config.chars_per_tick)
        {
            TickOutcome::Stale => {
                debug!(
                    stale = %tick.generation,
                    current = %self.state.generation(),
                    "dropping stale reveal tick"
                );
                false
            }
            TickOutcome::Advanced { .. } => true,
            TickOutcome::Finished => {
                self.stop_ticker();
                true
            }
            TickOutcome::Complete => false,
        }
    }

    /// Apply every tick that is ready without blocking.
    ///
    /// Returns `true` if the visible text changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(tick) = self.tick_rx.try_recv() {
            changed |= self.apply_tick(tick);
        }
        changed
    }

    /// Block for up to `timeout` waiting for the next tick, then drain.
    ///
    /// Returns `true` if the visible text changed.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        if self.state.is_complete() {
            return false;
        }
        match self.tick_rx.recv_timeout(timeout) {
            Ok(tick) => {
                let changed = self.apply_tick(tick);
                self.pump() || changed
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// The reveal configuration.
    pub const fn config(&self) -> RevealConfig {
        self.config
    }

    /// The reveal state.
    pub const fn state(&self) -> &RevealState {
        &self.state
    }

    /// Full text being revealed.
    pub fn text(&self) -> &str {
        self.state.text()
    }

    /// Currently visible prefix.
    pub fn visible(&self) -> &str {
        self.state.visible()
    }

    /// Whether the whole text is visible (hides the cursor indicator).
    pub const fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Whether a ticker is currently scheduled.
    pub const fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Parse the visible prefix into blocks.
    pub fn blocks(&self) -> Vec<Block> {
        parse_blocks(self.visible())
    }

    fn start_ticker(&mut self) {
        let step = self.config.chars_per_tick.max(1);
        let ticks = self.state.remaining().div_ceil(step);
        if ticks == 0 {
            return;
        }

        match RevealTicker::spawn(
            self.tick_tx.clone(),
            self.state.generation(),
            self.config.speed,
            ticks,
        ) {
            Ok(ticker) => self.ticker = Some(ticker),
            Err(err) => {
                warn!(error = %err, "failed to spawn reveal ticker, revealing instantly");
                self.state.reveal_all();
            }
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

impl Drop for Typewriter {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

impl std::fmt::Debug for Typewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typewriter")
            .field("config", &self.config)
            .field("generation", &self.state.generation())
            .field("displayed", &self.state.displayed_len())
            .field("total", &self.state.total_len())
            .field("ticking", &self.ticker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn tick(generation: Generation) -> Tick {
        Tick {
            generation,
            frame: 0,
            elapsed: Duration::ZERO,
        }
    }

    fn drive_to_completion(typewriter: &mut Typewriter) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !typewriter.is_complete() && Instant::now() < deadline {
            typewriter.wait(Duration::from_millis(20));
        }
    }

    #[test]
    fn test_speed_zero_is_instant() {
        let typewriter = Typewriter::with_text("## hi", RevealConfig::instant());
        assert!(typewriter.is_complete());
        assert!(!typewriter.is_ticking());
        assert_eq!(typewriter.visible(), "## hi");
    }

    #[test]
    fn test_reveal_runs_to_completion() {
        let mut typewriter = Typewriter::with_text("abcdef", RevealConfig::from_millis(1));
        assert_eq!(typewriter.visible(), "");
        drive_to_completion(&mut typewriter);
        assert!(typewriter.is_complete());
        assert_eq!(typewriter.visible(), "abcdef");
        assert!(!typewriter.is_ticking());
    }

    #[test]
    fn test_same_text_does_not_restart() {
        let mut typewriter = Typewriter::new(RevealConfig::from_millis(1000));
        typewriter.set_text("abc");
        let generation = typewriter.state().generation();
        assert!(typewriter.apply_tick(tick(generation)));
        typewriter.set_text("abc");
        assert_eq!(typewriter.state().generation(), generation);
        assert_eq!(typewriter.visible(), "a");
    }

    #[test]
    fn test_new_text_rejects_old_ticks() {
        let mut typewriter = Typewriter::new(RevealConfig::from_millis(1000));
        typewriter.set_text("first");
        let old = typewriter.state().generation();
        typewriter.set_text("second");

        assert!(!typewriter.apply_tick(tick(old)));
        assert_eq!(typewriter.visible(), "");

        let current = typewriter.state().generation();
        assert!(typewriter.apply_tick(tick(current)));
        assert_eq!(typewriter.visible(), "s");
    }

    #[test]
    fn test_switching_to_instant_finishes() {
        let mut typewriter = Typewriter::with_text("hello", RevealConfig::from_millis(1000));
        assert!(!typewriter.is_complete());
        typewriter.set_speed(Duration::ZERO);
        assert!(typewriter.is_complete());
        assert!(!typewriter.is_ticking());
    }

    #[test]
    fn test_repacing_drops_ticks_queued_at_old_speed() {
        let mut typewriter = Typewriter::with_text("abcdef", RevealConfig::from_millis(1000));
        let old = typewriter.state().generation();
        assert!(typewriter.apply_tick(tick(old)));

        typewriter.set_speed(Duration::from_millis(500));
        assert_ne!(typewriter.state().generation(), old);
        assert!(!typewriter.apply_tick(tick(old)));
        assert_eq!(typewriter.visible(), "a");
        assert!(typewriter.is_ticking());

        let current = typewriter.state().generation();
        assert!(typewriter.apply_tick(tick(current)));
        assert_eq!(typewriter.visible(), "ab");
    }

    #[test]
    fn test_chars_per_tick_coalesces() {
        let config = RevealConfig {
            speed: Duration::from_millis(1000),
            chars_per_tick: 3,
        };
        let mut typewriter = Typewriter::with_text("abcdefg", config);
        let generation = typewriter.state().generation();
        typewriter.apply_tick(tick(generation));
        assert_eq!(typewriter.visible(), "abc");
    }

    #[test]
    fn test_blocks_follow_visible_prefix() {
        let mut typewriter = Typewriter::new(RevealConfig::from_millis(1000));
        typewriter.set_text("# T");
        let generation = typewriter.state().generation();
        typewriter.apply_tick(tick(generation));
        // "#" alone is not yet a heading
        assert!(matches!(typewriter.blocks()[0], Block::Paragraph(_)));
        typewriter.finish();
        assert!(matches!(typewriter.blocks()[0], Block::Heading(_)));
    }
}
