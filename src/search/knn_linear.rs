//! K-Nearest Neighbors search by exhaustive scan.

use crate::core::{dataset::RowMajor, metric::Metric};

use super::heap::BoundedHeap;

/// Scans every row of `data` and returns the `k` nearest neighbors of
/// `query` as `(index, distance)` pairs in heap order.
///
/// This is the exhaustive baseline: it visits all `N` rows regardless of the
/// metric's properties, and the tree search must return the same multiset of
/// distances. Callers are expected to pass `1 <= k <= N`; with a larger `k`
/// the tail of the result keeps its `+inf` sentinels.
pub fn search<M: Metric>(data: &RowMajor, metric: &M, query: &[f64], k: usize) -> Vec<(usize, f64)> {
    let mut distances = vec![f64::INFINITY; k];
    let mut indices = vec![0; k];

    let mut hits = BoundedHeap::new(&mut distances, &mut indices);
    for p in 0..data.cardinality() {
        hits.push_if_better(metric.distance(data.row(p), query), p);
    }

    indices.into_iter().zip(distances).collect()
}
