use std::thread;
use std::time::{Duration, Instant};

/// Time source for the scheduler. The controller only ever needs a monotonic
/// elapsed-time reading and a bounded sleep, so both live behind one trait
/// and the whole control loop can be driven instantly in tests.
pub trait Clock {
    /// Monotonic time elapsed since the clock was created.
    fn now(&self) -> Duration;
    /// Blocks the cooperative control flow for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock implementation used by the running controller.
pub struct SystemClock {
    started_at: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.started_at.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Test clock: `sleep` advances `now` instantly, so a full traffic cycle runs
/// in microseconds while keeping every tick and debounce comparison exact.
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward without sleeping, e.g. between explicit polls.
    pub fn advance(&mut self, duration: Duration) {
        self.elapsed += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.elapsed
    }

    fn sleep(&mut self, duration: Duration) {
        self.elapsed += duration;
    }
}
