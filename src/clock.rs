//! Time source abstraction.
//!
//! The engine never reads wall-clock time directly. Every timestamp it stores
//! and every remaining-duration it reports is computed from the [`Clock`] it
//! was constructed with, so tests can drive time by hand with a
//! [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current time.
pub trait Clock {
    /// Get the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for deterministic tests.
///
/// Clones share the same underlying instant: hand one clone to the engine and
/// keep another to move time forward.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    /// Move the clock forward (or backward, for a negative delta).
    ///
    /// Saturates at the current instant if the result is out of range.
    pub fn advance(&self, delta: TimeDelta) {
        let current = self.now.get();
        self.now
            .set(current.checked_add_signed(delta).unwrap_or(current));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
