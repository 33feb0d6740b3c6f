//! Terminal report for the demo harness
//!
//! Collects pushed metric values as rows and renders them as a table or JSON.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use serde::Serialize;

use crate::metrics::MetricSink;

/// One pushed metric value with the context it was measured in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub workload: String,
    pub sample: usize,
    pub metric: &'static str,
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Default)]
pub struct ReportTable {
    rows: Vec<ReportRow>,
}

impl ReportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that labels every value it receives with the given context
    pub fn sink<'a>(&'a mut self, workload: &'a str, sample: usize, metric: &'static str) -> RowSink<'a> {
        RowSink {
            table: self,
            workload,
            sample,
            metric,
        }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn render(&self) -> Table {
        let header = ["Workload", "Sample", "Metric", "Value", "Unit"]
            .into_iter()
            .map(|title| Cell::new(title).add_attribute(Attribute::Bold).fg(Color::Cyan));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(header);
        for row in &self.rows {
            table.add_row(vec![
                Cell::new(&row.workload),
                Cell::new(row.sample),
                Cell::new(row.metric),
                Cell::new(format!("{:.1}", row.value)).set_alignment(CellAlignment::Right),
                Cell::new(&row.unit),
            ]);
        }
        table
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.rows)
    }
}

pub struct RowSink<'a> {
    table: &'a mut ReportTable,
    workload: &'a str,
    sample: usize,
    metric: &'static str,
}

impl MetricSink for RowSink<'_> {
    fn report_metric(&mut self, value: f64, unit: &str) {
        self.table.rows.push(ReportRow {
            workload: self.workload.to_string(),
            sample: self.sample,
            metric: self.metric,
            value,
            unit: unit.to_string(),
        });
    }
}
