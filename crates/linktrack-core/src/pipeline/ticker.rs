use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::consts::MAX_SLEEP_SLICE_MS;

/// Paces a loop to at most one iteration per `interval`.
///
/// Deadlines advance by whole intervals from the start time. When an
/// iteration overruns, the missed ticks are skipped rather than fired back to
/// back, so a slow cycle never causes a burst.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until the next tick. Returns `false` if `running` was cleared
    /// while waiting.
    pub fn wait(&mut self, running: &AtomicBool) -> bool {
        let now = Instant::now();
        if self.next > now && !sleep_while_running(running, self.next - now) {
            return false;
        }

        let now = Instant::now();
        self.next += self.interval;
        if self.next <= now {
            let behind = now.duration_since(self.next);
            let skipped = (behind.as_nanos() / self.interval.as_nanos().max(1)) as u32 + 1;
            self.next += self.interval * skipped;
        }
        running.load(Ordering::Acquire)
    }
}

/// Sleep for `duration` in short slices, returning early (with `false`) once
/// `running` is cleared.
pub fn sleep_while_running(running: &AtomicBool, duration: Duration) -> bool {
    let deadline = Instant::now() + duration;
    let slice = Duration::from_millis(MAX_SLEEP_SLICE_MS);
    loop {
        if !running.load(Ordering::Acquire) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep((deadline - now).min(slice));
    }
}
