//! The `Hamming` distance metric.

use distances::Number;

use super::Metric;

/// The `Hamming` distance metric: the number of coordinates at which two
/// vectors differ.
///
/// Coordinates are compared with exact `f64` equality, with no tolerance.
/// Callers indexing float-encoded categorical data should normalize the
/// encoding before building the index. A NaN coordinate compares unequal to
/// every coordinate, including itself.
pub struct Hamming;

impl Metric for Hamming {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b.iter()).filter(|(x, y)| x != y).count().as_f64()
    }

    fn name(&self) -> &str {
        "hamming"
    }

    fn obeys_triangle_inequality(&self) -> bool {
        true
    }
}
