//! The `Manhattan` distance metric.

use super::Metric;

/// The `Manhattan` distance metric: `sum(|a_i - b_i|)`.
pub struct Manhattan;

impl Metric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        distances::vectors::manhattan(a, b)
    }

    fn name(&self) -> &str {
        "manhattan"
    }

    fn obeys_triangle_inequality(&self) -> bool {
        true
    }
}
