//! CPU Time Benchmark Metrics Library
//!
//! This library measures process CPU time across benchmark iterations and
//! reports it as nanoseconds of CPU time per operation (`ns_cpu/op`).
//!
//! ```no_run
//! use cpu_bench_metrics::{Collector, CpuTime};
//!
//! let mut collector = Collector::new();
//! collector.add_metric(CpuTime::new());
//!
//! collector.start();
//! // ... benchmark loop running `n` operations ...
//! collector.stop();
//!
//! for collectible in collector.collect(1000).unwrap() {
//!     let (value, unit) = collectible.values();
//!     println!("{value} {unit}");
//! }
//! ```

pub mod clock;
pub mod core;
pub mod metrics;
pub mod ui;

pub use crate::core::run_benchmark;
pub use clock::{Clock, ClockError, ManualClock, ProcessClock};
pub use metrics::{Collectible, Collector, CpuTime, Metric, MetricSink, MetricsError, CPU_TIME_UNIT};

/// Library version
pub const VERSION: &str = "0.1.0";
