//! Wall-clock frame pacing.

use std::time::{Duration, Instant};

/// Holds each frame to a fixed wall-clock length.
///
/// A frame that finishes early sleeps out the remainder. A frame that
/// overruns is not caught up on: the next one simply starts late.
pub struct FramePacer {
    frame: Duration,
    started: Instant,
}

impl FramePacer {
    #[must_use]
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            started: Instant::now(),
        }
    }

    /// Mark the start of a frame.
    pub fn begin(&mut self) {
        self.started = Instant::now();
    }

    /// Time left in a frame that has been running for `elapsed`.
    #[must_use]
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.frame.checked_sub(elapsed).filter(|rest| !rest.is_zero())
    }

    /// Sleep until the frame budget is used up. Returns the time slept.
    pub fn finish(&mut self) -> Duration {
        let elapsed = self.started.elapsed();
        match self.remaining(elapsed) {
            Some(rest) => {
                std::thread::sleep(rest);
                rest
            }
            None => {
                log::debug!("Frame overran by {:?}", elapsed - self.frame);
                Duration::ZERO
            }
        }
    }
}
