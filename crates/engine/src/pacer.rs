//! Fixed-rate frame pacing.

use std::time::Duration;

use crate::types::FPS;

/// Most frames produced by a single `advance`; a longer stall drops the backlog.
const MAX_CATCH_UP: u32 = 8;

/// Turns elapsed wall-clock time into whole frames, carrying the remainder.
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame: Duration,
    carry: Duration,
}

impl FramePacer {
    /// Pacer for `fps` frames per second; non-positive rates fall back to [`FPS`].
    pub fn new(fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { FPS };
        Self {
            frame: Duration::from_nanos((1e9 / fps).round() as u64),
            carry: Duration::ZERO,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Add `elapsed` and return how many frames are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry += elapsed;
        let due = self.carry.as_nanos() / self.frame.as_nanos().max(1);
        if due > MAX_CATCH_UP as u128 {
            self.carry = Duration::ZERO;
            return MAX_CATCH_UP;
        }
        let due = due as u32;
        self.carry -= self.frame * due;
        due
    }

    /// Time left until the next frame is due.
    pub fn until_next_frame(&self) -> Duration {
        self.frame.saturating_sub(self.carry)
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(FPS)
    }
}
