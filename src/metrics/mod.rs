//! Benchmark metrics
//!
//! A [`Metric`] is anything that can be started, stopped, reset and turned into
//! a per-operation value. [`CpuTime`] is the process CPU-time implementation and
//! [`Collector`] broadcasts the same lifecycle to a list of metrics.

pub mod collectible;
pub mod collector;
pub mod cpu_time;

pub use collectible::Collectible;
pub use collector::Collector;
pub use cpu_time::CpuTime;

/// Unit label for every CPU-time value, kept stable for result parsers
pub const CPU_TIME_UNIT: &str = "ns_cpu/op";

/// Errors surfaced when turning a metric into a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MetricsError {
    #[error("iteration count must be non-zero")]
    ZeroIterations,
}

/// Receiver for push-style reports, one call per metric per report
pub trait MetricSink {
    fn report_metric(&mut self, value: f64, unit: &str);
}

impl<F> MetricSink for F
where
    F: FnMut(f64, &str),
{
    fn report_metric(&mut self, value: f64, unit: &str) {
        self(value, unit)
    }
}

/// Lifecycle shared by every metric kind
///
/// Calls are issued sequentially by a single benchmark driver. Out-of-order
/// calls (a second `start`, a `stop` with nothing running) are ignored rather
/// than reported.
pub trait Metric {
    fn start(&mut self);

    fn stop(&mut self);

    /// Discard accumulated measurements without changing whether the metric
    /// is running.
    fn reset(&mut self);

    /// Value normalised by the `iterations` the benchmark performed
    fn collect(&self, iterations: u64) -> Result<Collectible, MetricsError>;

    /// Push the collected value into `sink`
    fn report(&self, iterations: u64, sink: &mut dyn MetricSink) -> Result<(), MetricsError> {
        let (value, unit) = self.collect(iterations)?.values();
        sink.report_metric(value, unit);
        Ok(())
    }
}

impl<M: Metric + ?Sized> Metric for Box<M> {
    fn start(&mut self) {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn collect(&self, iterations: u64) -> Result<Collectible, MetricsError> {
        (**self).collect(iterations)
    }

    fn report(&self, iterations: u64, sink: &mut dyn MetricSink) -> Result<(), MetricsError> {
        (**self).report(iterations, sink)
    }
}
