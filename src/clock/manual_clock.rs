//! Manually driven clock
//!
//! Readings only move when the owner calls [`ManualClock::advance`] or
//! [`ManualClock::set`]. Clones share one reading, so a caller can keep one
//! handle and hand another to a timer.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use super::{Clock, ClockError};

/// Clock whose reading is set explicitly by the caller
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    reading: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the reading forward by `by`
    pub fn advance(&self, by: Duration) {
        self.reading.set(self.reading.get() + by);
    }

    /// Jump to an absolute reading
    pub fn set(&self, reading: Duration) {
        self.reading.set(reading);
    }

    pub fn get(&self) -> Duration {
        self.reading.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Result<Duration, ClockError> {
        Ok(self.reading.get())
    }
}
