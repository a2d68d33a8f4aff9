//! Injectable time sources.
//!
//! Velocity and curve progress read time through [`Clock`] so tests can
//! drive frames deterministically with [`ManualClock`].

use std::cell::Cell;
use std::time::Instant;

/// Monotonic time in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Clock advanced by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Creates a clock reading `start` seconds.
    pub fn new(start: f64) -> Self {
        Self { now: Cell::new(start) }
    }

    /// Jumps to `now`.
    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    /// Moves forward by `dt` seconds.
    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}
