//! Polled LED heartbeat.
//!
//! Cooperative, non-blocking: the main loop calls [`Heartbeat::poll`]
//! on every iteration with the current monotonic millisecond count, and
//! drives the pin only when a toggle is due. No timer interrupt, no
//! sleeping.

use crate::config::HEARTBEAT_INTERVAL_MS;

/// Accumulating-deadline LED toggler.
///
/// The deadline advances by exactly one interval per fire instead of
/// being reset to the current time, so the blink cadence does not drift
/// under irregular polling.
pub struct Heartbeat {
    interval_ms: u32,
    deadline_ms: u32,
    level: bool,
}

impl Heartbeat {
    /// Create a heartbeat with the default interval, anchored at `now_ms`.
    pub fn new(now_ms: u32) -> Self {
        Self::with_interval(now_ms, HEARTBEAT_INTERVAL_MS)
    }

    /// Create a heartbeat with a custom interval (ms).
    pub fn with_interval(now_ms: u32, interval_ms: u32) -> Self {
        Self {
            interval_ms,
            deadline_ms: now_ms,
            level: false,
        }
    }

    /// Poll the heartbeat. Returns `Some(level)` when the pin should be
    /// driven to `level`, `None` when nothing is due yet.
    ///
    /// At most one toggle per call; wrapping arithmetic keeps the
    /// elapsed check correct across the u32 millisecond rollover.
    pub fn poll(&mut self, now_ms: u32) -> Option<bool> {
        if now_ms.wrapping_sub(self.deadline_ms) < self.interval_ms {
            return None; // not enough time
        }

        self.deadline_ms = self.deadline_ms.wrapping_add(self.interval_ms);
        self.level = !self.level;
        Some(self.level)
    }

    /// Current output level (for tests and re-driving the pin).
    pub fn level(&self) -> bool {
        self.level
    }
}
