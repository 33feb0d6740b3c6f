//! CPU-time clock sources for metric timers
//!
//! This module provides the clock abstraction the timers read from, the real
//! process CPU-time clock, and a manually driven clock for deterministic runs.

pub mod manual_clock;
pub mod process_clock;

use std::io;
use std::time::Duration;

pub use manual_clock::ManualClock;
pub use process_clock::ProcessClock;

/// Errors raised when a clock cannot be read
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    #[error("process CPU-time clock unavailable: {0}")]
    Unavailable(#[from] io::Error),
    #[error("process CPU-time clock is not supported on this platform")]
    Unsupported,
}

/// A source of monotonic CPU-time readings
pub trait Clock {
    /// Current reading as an offset from the clock's own origin
    fn now(&self) -> Result<Duration, ClockError>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Result<Duration, ClockError> {
        (**self).now()
    }
}
