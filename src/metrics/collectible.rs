//! Pull-style metric result

use serde::Serialize;

/// One reported value with its unit label
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Collectible {
    value: f64,
    unit: &'static str,
}

impl Collectible {
    pub fn new(value: f64, unit: &'static str) -> Self {
        Self { value, unit }
    }

    /// Value and unit as a pair, in the order a metric sink takes them
    pub fn values(&self) -> (f64, &'static str) {
        (self.value, self.unit)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }
}
