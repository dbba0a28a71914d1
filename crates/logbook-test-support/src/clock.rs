//! Test clocks — deterministic `Clock` implementations for tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};
use logbook_core::clock::Clock;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A clock that returns a strictly increasing timestamp on every call,
/// starting at `start` and advancing by `step_secs` per call.
///
/// Useful for ordering and prune tests, where distinct timestamps per
/// write are required.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    step_secs: i64,
    ticks: AtomicI64,
}

impl SteppingClock {
    /// Creates a clock whose first `now()` returns `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>, step_secs: i64) -> Self {
        Self {
            start,
            step_secs,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(self.step_secs * tick)
    }
}
