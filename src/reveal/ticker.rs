//! Reveal ticker: dedicated thread pacing one typewriter reveal.
//!
//! The ticker emits generation-stamped [`Tick`]s at a fixed interval and
//! exits on its own once it has delivered as many ticks as the reveal needs,
//! so a finished reveal leaves no timer behind.

use super::state::Generation;
use crossbeam_channel::{Sender, TrySendError};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

/// A tick event for one reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Reveal this tick was scheduled for.
    pub generation: Generation,
    /// Tick number within the reveal (monotonically increasing).
    pub frame: u64,
    /// Time elapsed since the ticker was started.
    pub elapsed: Duration,
}

/// Ticker thread that drives a single reveal.
pub struct RevealTicker {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    generation: Generation,
}

impl RevealTicker {
    /// Spawn a ticker delivering at most `ticks` ticks, one per `interval`.
    ///
    /// Ticks are sent without blocking. When the channel is full the tick is
    /// retried on the next interval rather than queued, so a slow consumer
    /// slows the reveal down instead of building a backlog.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(
        tick_tx: Sender<Tick>,
        generation: Generation,
        interval: Duration,
        ticks: usize,
    ) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name(format!("typecast-reveal-{}", generation.0))
            .spawn(move || {
                Self::run_loop(&tick_tx, &shutdown_clone, generation, interval, ticks);
            })?;

        debug!(%generation, ?interval, ticks, "reveal ticker started");

        Ok(Self {
            handle: Some(handle),
            shutdown,
            generation,
        })
    }

    /// Generation this ticker stamps on its ticks.
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Signal the ticker to stop.
    ///
    /// A tick already in flight may still land in the channel; consumers
    /// drop it by its generation.
    pub fn cancel(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    /// Whether the ticker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Cancel and wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main ticker loop.
    fn run_loop(
        tick_tx: &Sender<Tick>,
        shutdown: &AtomicBool,
        generation: Generation,
        interval: Duration,
        ticks: usize,
    ) {
        let start = Instant::now();
        let mut frame = 0u64;
        let mut sent = 0usize;
        let mut next_tick = start + interval;

        while sent < ticks {
            if shutdown.load(Ordering::Acquire) {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                let tick = Tick {
                    generation,
                    frame,
                    elapsed: now - start,
                };

                match tick_tx.try_send(tick) {
                    Ok(()) => {
                        sent += 1;
                        frame += 1;
                    }
                    // Consumer is behind; try again next interval
                    Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Disconnected(_)) => break,
                }

                next_tick += interval;

                // Handle case where we're behind (catch up without queuing)
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                // Sleep until next tick
                let sleep_duration = next_tick - now;
                thread::sleep(sleep_duration.min(Duration::from_millis(1)));
            }
        }

        debug!(%generation, sent, "reveal ticker stopped");
    }
}

impl Drop for RevealTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
