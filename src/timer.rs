use std::time::Duration;

/// A cancellable task that fires once per `interval` of host time while
/// running. There is only ever one phase: `start` on a running task restarts
/// it instead of stacking a second one.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatingTask {
    interval: Duration,
    elapsed: Duration,
    running: bool,
}

impl RepeatingTask {
    /// Creates a stopped task. A zero interval is bumped to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    /// Starts the task with a fresh phase, replacing any running one.
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    /// Stops the task. Stopping a stopped task does nothing.
    pub fn stop(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Advances the task by `dt` and returns how many times it fired.
    pub fn update(&mut self, dt: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}
