//! Terminal output for the demo harness

pub mod report_table;
