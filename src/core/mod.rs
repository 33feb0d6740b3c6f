use std::io::{self, Error, ErrorKind};
use std::path::Path;
use std::fs;

use colored::*;
use serde::{Deserialize, Serialize};

use crate::metrics::{Collector, CpuTime, Metric, MetricsError};
use crate::ui::report_table::ReportTable;

pub mod workload;

use workload::Workload;

/// Settings file read from the working directory when present
pub const SETTINGS_FILE: &str = "benchsettings.json";

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BenchmarkingParameters {
    #[serde(rename = "Iterations", default = "default_iterations", deserialize_with = "validate_positive_u64")]
    pub iterations: u64,
    #[serde(rename = "Samples", default = "default_samples", deserialize_with = "validate_positive_usize")]
    pub samples: usize,
    #[serde(rename = "OutputFormat", default = "default_output_format")]
    pub output_format: OutputFormat,
}

impl Default for BenchmarkingParameters {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            samples: default_samples(),
            output_format: default_output_format(),
        }
    }
}

fn default_iterations() -> u64 {
    1000
}

fn default_samples() -> usize {
    3
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn validate_positive_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = u64::deserialize(deserializer)?;
    if value > 0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("Value must be positive"))
    }
}

fn validate_positive_usize<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = usize::deserialize(deserializer)?;
    if value > 0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("Value must be positive"))
    }
}

/// Load parameters from `path`, falling back to defaults when the file is absent
pub fn load_parameters(path: &Path) -> io::Result<BenchmarkingParameters> {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("{} not found, using default parameters", path.display());
            Ok(BenchmarkingParameters::default())
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// MEASUREMENT
// ============================================================================

/// Measure `workload` for `params.samples` rounds, pushing every value into `table`
///
/// Each round resets the collector, times the whole loop with it, and times
/// only the operations themselves with a separately driven timer.
pub fn measure_workload(
    workload: Workload,
    params: &BenchmarkingParameters,
    table: &mut ReportTable,
) -> Result<(), MetricsError> {
    let mut collector = Collector::new();
    collector.add_metric(CpuTime::new());
    let mut per_op = CpuTime::new();

    for sample in 1..=params.samples {
        collector.reset();
        per_op.reset();

        collector.start();
        for _ in 0..params.iterations {
            per_op.start();
            workload.run_once();
            per_op.stop();
        }
        collector.stop();

        collector.report(params.iterations, &mut table.sink(workload.name(), sample, "loop"))?;
        per_op.report(params.iterations, &mut table.sink(workload.name(), sample, "operation"))?;
        log::debug!("{} sample {} done", workload.name(), sample);
    }

    Ok(())
}

pub fn run_benchmark() -> io::Result<()> {
    let separator = "=".repeat(60);

    println!("\n{}", separator);
    println!("{:^60}", "CPU Time Benchmark".bold().cyan());
    println!("{}\n", separator);

    println!("{}", "System Information".bold().yellow());
    println!("━━━━━━━━━━━━━━━━━━━");
    println!("OS: {}", os_info::get());
    println!();

    let params = load_parameters(Path::new(SETTINGS_FILE)).map_err(|e| {
        eprintln!("❌ Configuration Error: {}", e);
        e
    })?;

    println!("{}", "Benchmark Parameters".bold().yellow());
    println!("━━━━━━━━━━━━━━━━━━━");
    println!("▸ Iterations: {}", params.iterations);
    println!("▸ Samples: {}", params.samples);
    println!();

    let mut table = ReportTable::new();
    for &workload in Workload::all() {
        println!("▸ Running {}...", workload.name());
        measure_workload(workload, &params, &mut table)
            .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
    }
    println!();

    match params.output_format {
        OutputFormat::Table => println!("{}", table.render()),
        OutputFormat::Json => println!("{}", table.to_json()?),
    }

    Ok(())
}
