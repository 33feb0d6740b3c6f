//! Fan-out over a list of metrics
//!
//! The collector only drives the [`Metric`] lifecycle, so any mix of metric
//! kinds can be registered. Members are visited in insertion order and results
//! come back in that order.

use super::{Collectible, Metric, MetricSink, MetricsError};

#[derive(Default)]
pub struct Collector {
    metrics: Vec<Box<dyn Metric>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_metric(&mut self, metric: impl Metric + 'static) {
        self.metrics.push(Box::new(metric));
    }

    /// Append several metrics, keeping their order
    pub fn add_metrics<I>(&mut self, metrics: I)
    where
        I: IntoIterator<Item = Box<dyn Metric>>,
    {
        self.metrics.extend(metrics);
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn start(&mut self) {
        log::debug!("starting {} metrics", self.metrics.len());
        for metric in &mut self.metrics {
            metric.start();
        }
    }

    pub fn stop(&mut self) {
        log::debug!("stopping {} metrics", self.metrics.len());
        for metric in &mut self.metrics {
            metric.stop();
        }
    }

    pub fn reset(&mut self) {
        log::debug!("resetting {} metrics", self.metrics.len());
        for metric in &mut self.metrics {
            metric.reset();
        }
    }

    /// Collect every member, aligned with insertion order
    pub fn collect(&self, iterations: u64) -> Result<Vec<Collectible>, MetricsError> {
        self.metrics
            .iter()
            .map(|metric| metric.collect(iterations))
            .collect()
    }

    /// Push every member's value into `sink`, in insertion order
    pub fn report(&self, iterations: u64, sink: &mut dyn MetricSink) -> Result<(), MetricsError> {
        for metric in &self.metrics {
            metric.report(iterations, sink)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("metrics", &self.metrics.len())
            .finish()
    }
}

impl Extend<Box<dyn Metric>> for Collector {
    fn extend<I: IntoIterator<Item = Box<dyn Metric>>>(&mut self, iter: I) {
        self.add_metrics(iter);
    }
}

impl FromIterator<Box<dyn Metric>> for Collector {
    fn from_iter<I: IntoIterator<Item = Box<dyn Metric>>>(iter: I) -> Self {
        let mut collector = Self::new();
        collector.add_metrics(iter);
        collector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ClockError, ManualClock};
    use crate::metrics::{CpuTime, CPU_TIME_UNIT};
    use std::cell::RefCell;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;
    use std::time::Duration;

    /// Records the calls it receives into a shared log
    struct Probe {
        name: &'static str,
        value: f64,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Probe {
        fn boxed(name: &'static str, value: f64, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn Metric> {
            Box::new(Self {
                name,
                value,
                log: Rc::clone(log),
            })
        }

        fn record(&self, op: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.name, op));
        }
    }

    impl Metric for Probe {
        fn start(&mut self) {
            self.record("start");
        }

        fn stop(&mut self) {
            self.record("stop");
        }

        fn reset(&mut self) {
            self.record("reset");
        }

        fn collect(&self, iterations: u64) -> Result<Collectible, MetricsError> {
            if iterations == 0 {
                return Err(MetricsError::ZeroIterations);
            }
            Ok(Collectible::new(self.value, "probe/op"))
        }
    }

    fn probes(log: &Rc<RefCell<Vec<String>>>) -> Collector {
        vec![
            Probe::boxed("a", 1.0, log),
            Probe::boxed("b", 2.0, log),
            Probe::boxed("c", 3.0, log),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_collect_follows_insertion_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let collector = probes(&log);

        let values: Vec<f64> = collector
            .collect(10)
            .unwrap()
            .iter()
            .map(Collectible::value)
            .collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_broadcast_visits_members_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut collector = probes(&log);

        collector.start();
        collector.stop();
        collector.reset();

        assert_eq!(
            *log.borrow(),
            vec![
                "a:start", "b:start", "c:start", "a:stop", "b:stop", "c:stop", "a:reset",
                "b:reset", "c:reset",
            ]
        );
    }

    #[test]
    fn test_report_pushes_each_member() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let collector = probes(&log);

        let mut seen = Vec::new();
        collector
            .report(5, &mut |value: f64, unit: &str| seen.push((value, unit.to_owned())))
            .unwrap();
        assert_eq!(
            seen,
            vec![
                (1.0, "probe/op".to_owned()),
                (2.0, "probe/op".to_owned()),
                (3.0, "probe/op".to_owned()),
            ]
        );
    }

    #[test]
    fn test_zero_iterations_propagates() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let collector = probes(&log);
        assert_eq!(collector.collect(0), Err(MetricsError::ZeroIterations));

        let mut calls = 0;
        let result = collector.report(0, &mut |_: f64, _: &str| calls += 1);
        assert_eq!(result, Err(MetricsError::ZeroIterations));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_fan_out_matches_direct_timers() {
        let clock = ManualClock::new();

        let mut direct_a = CpuTime::with_clock(clock.clone());
        let mut direct_b = CpuTime::with_clock(clock.clone());
        let mut collector = Collector::new();
        collector.add_metric(CpuTime::with_clock(clock.clone()));
        collector.add_metric(CpuTime::with_clock(clock.clone()));

        for step in [3u64, 11] {
            direct_a.start();
            direct_b.start();
            collector.start();
            clock.advance(Duration::from_micros(step));
            direct_a.stop();
            direct_b.stop();
            collector.stop();
            clock.advance(Duration::from_micros(100));
        }

        let expected = vec![direct_a.collect(7).unwrap(), direct_b.collect(7).unwrap()];
        let collected = collector.collect(7).unwrap();
        assert_eq!(collected, expected);
        assert_eq!(collected[0].values(), (14_000.0 / 7.0, CPU_TIME_UNIT));
    }

    #[test]
    fn test_reset_clears_all_members() {
        let clock = ManualClock::new();
        let mut collector: Collector = (0..2)
            .map(|_| Box::new(CpuTime::with_clock(clock.clone())) as Box<dyn Metric>)
            .collect();

        collector.start();
        clock.advance(Duration::from_millis(1));
        collector.stop();
        collector.reset();

        for collectible in collector.collect(1).unwrap() {
            assert_eq!(collectible.value(), 0.0);
        }
    }

    struct BrokenClock;

    impl Clock for BrokenClock {
        fn now(&self) -> Result<Duration, ClockError> {
            Err(ClockError::Unsupported)
        }
    }

    #[test]
    fn test_member_panic_stops_broadcast() {
        let clock = ManualClock::new();
        let mut collector = Collector::new();
        collector.add_metric(CpuTime::with_clock(BrokenClock));
        collector.add_metric(CpuTime::with_clock(clock.clone()));

        let started = panic::catch_unwind(AssertUnwindSafe(|| collector.start()));
        assert!(started.is_err());

        // the second member was never started, so stop has nothing to close
        clock.advance(Duration::from_millis(5));
        collector.stop();
        let values: Vec<f64> = collector
            .collect(1)
            .unwrap()
            .iter()
            .map(Collectible::value)
            .collect();
        assert_eq!(values, vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_collector() {
        let collector = Collector::new();
        assert!(collector.is_empty());
        assert_eq!(collector.collect(1).unwrap(), Vec::new());
    }
}
