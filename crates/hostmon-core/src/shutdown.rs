//! Cooperative cancellation shared by the samplers and the reporter.
//!
//! Loops observe the token only at their sleep boundary. `sleep` polls the
//! flag in short slices, so a loop notices cancellation within one slice of
//! the flag flipping and never later than one full interval.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Granularity at which a sleeping loop re-checks the flag.
const POLL_SLICE: Duration = Duration::from_millis(100);

/// Shared run flag. Starts running, flips to stopped once, never resets.
#[derive(Debug, Clone)]
pub struct ShutdownToken {
    running: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Requests shutdown. Returns true only for the call that flipped the flag.
    pub fn cancel(&self) -> bool {
        self.running.swap(false, Ordering::SeqCst)
    }

    /// Sleeps for `duration` unless cancelled first.
    ///
    /// Returns whether the token is still running on wake.
    pub fn sleep(&self, duration: Duration) -> bool {
        let mut remaining = duration;
        while remaining > Duration::ZERO && self.is_running() {
            let sleep_time = remaining.min(POLL_SLICE);
            std::thread::sleep(sleep_time);
            remaining = remaining.saturating_sub(sleep_time);
        }
        self.is_running()
    }
}

impl Default for ShutdownToken {
    fn default() -> Self {
        Self::new()
    }
}
