//! Process CPU time as a benchmark metric
//!
//! Accumulates CPU time across any number of start/stop intervals and reports
//! it as nanoseconds of CPU time per benchmark operation.

use std::time::Duration;

use crate::clock::{Clock, ProcessClock};

use super::{Collectible, Metric, MetricsError, CPU_TIME_UNIT};

/// CPU-time timer over a [`Clock`], the process CPU clock by default
#[derive(Debug, Clone)]
pub struct CpuTime<C: Clock = ProcessClock> {
    clock: C,
    active: bool,
    interval_start: Duration,
    accumulated: Duration,
}

impl CpuTime<ProcessClock> {
    pub fn new() -> Self {
        Self::with_clock(ProcessClock::new())
    }
}

impl Default for CpuTime<ProcessClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CpuTime<C> {
    /// Create an inactive timer reading from `clock`
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            active: false,
            interval_start: Duration::ZERO,
            accumulated: Duration::ZERO,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// CPU time of all completed intervals since the last reset
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// A clock that cannot be read leaves nothing to measure with, so this
    /// panics instead of returning.
    fn now(&self) -> Duration {
        match self.clock.now() {
            Ok(reading) => reading,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<C: Clock> Metric for CpuTime<C> {
    fn start(&mut self) {
        if self.active {
            log::trace!("cpu time already running, start ignored");
            return;
        }
        self.interval_start = self.now();
        self.active = true;
    }

    fn stop(&mut self) {
        if !self.active {
            log::trace!("cpu time not running, stop ignored");
            return;
        }
        // saturating: a clock that steps back must not underflow
        self.accumulated += self.now().saturating_sub(self.interval_start);
        self.active = false;
    }

    fn reset(&mut self) {
        if self.active {
            self.interval_start = self.now();
        }
        self.accumulated = Duration::ZERO;
    }

    fn collect(&self, iterations: u64) -> Result<Collectible, MetricsError> {
        if iterations == 0 {
            return Err(MetricsError::ZeroIterations);
        }
        let per_op = self.accumulated.as_nanos() as f64 / iterations as f64;
        Ok(Collectible::new(per_op, CPU_TIME_UNIT))
    }
}
