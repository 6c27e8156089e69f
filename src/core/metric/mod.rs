//! The `Metric` trait is used for all distance computations in the index.

mod euclidean;
mod hamming;
mod manhattan;

pub use euclidean::Euclidean;
pub use hamming::Hamming;
pub use manhattan::Manhattan;

/// The distance function under which an index is built and queried.
///
/// Implementations must be symmetric and non-negative. Query pruning
/// additionally relies on the triangle inequality: an implementation that
/// does not satisfy it must report so through
/// [`obeys_triangle_inequality`](Metric::obeys_triangle_inequality), which
/// disables pruning and makes every query an exhaustive descent.
pub trait Metric {
    /// Call the metric on two vectors.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// The name of the metric.
    fn name(&self) -> &str;

    /// Whether the metric satisfies the triangle inequality.
    ///
    /// The triangle inequality is defined as `d(a, b) + d(b, c) >= d(a, c)`
    /// for all vectors `a`, `b`, and `c`. When it holds, subtree pruning is
    /// exact and search results have perfect recall.
    fn obeys_triangle_inequality(&self) -> bool;
}

/// Looks up a metric by name.
///
/// Recognized names are `"euclidean"`, `"manhattan"`, and `"hamming"`,
/// case-insensitively. Any other name falls back to `Euclidean`.
///
/// # Example
///
/// ```rust
/// use ball_tree::{metric, Metric};
///
/// assert_eq!(metric::from_name("manhattan").name(), "manhattan");
/// assert_eq!(metric::from_name("cosine").name(), "euclidean");
/// ```
#[must_use]
pub fn from_name(name: &str) -> Box<dyn Metric + Send + Sync> {
    match name.to_lowercase().as_str() {
        "manhattan" => Box::new(Manhattan),
        "hamming" => Box::new(Hamming),
        _ => Box::new(Euclidean),
    }
}

impl Metric for Box<dyn Metric + Send + Sync> {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        (**self).distance(a, b)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn obeys_triangle_inequality(&self) -> bool {
        (**self).obeys_triangle_inequality()
    }
}
