//! The `Euclidean` distance metric.

use super::Metric;

/// The `Euclidean` distance metric: `sqrt(sum((a_i - b_i)^2))`.
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        distances::vectors::euclidean(a, b)
    }

    fn name(&self) -> &str {
        "euclidean"
    }

    fn obeys_triangle_inequality(&self) -> bool {
        true
    }
}
