//! Common functions for checking search results.

use ball_tree::{knn_linear, BallTree, Metric, Neighbors, RowMajor};

/// Asserts that two hit lists agree as multisets of distances.
///
/// Indices are ignored on purpose: when several points tie at the cutoff
/// distance, the tree and the exhaustive scan may keep different ones.
pub fn assert_same_distances(found: &[(usize, f64)], expected: &[(usize, f64)], label: &str) {
    let found = sorted_distances(found);
    let expected = sorted_distances(expected);
    assert_eq!(found.len(), expected.len(), "{label}: hit counts differ");

    let worst = found
        .iter()
        .zip(expected.iter())
        .map(|(f, e)| (f - e).abs())
        .fold(0.0_f64, f64::max);
    assert!(
        worst <= 1e-12,
        "{label}: distance multisets differ by {worst}: {found:?} vs {expected:?}"
    );
}

/// The distances of the given hits, in ascending order.
fn sorted_distances(hits: &[(usize, f64)]) -> Vec<f64> {
    let mut distances = hits.iter().map(|&(_, d)| d).collect::<Vec<_>>();
    distances.sort_by(f64::total_cmp);
    distances
}

/// Gathers one row of a `Neighbors` into `(index, distance)` pairs.
pub fn row_hits(hits: &Neighbors, q: usize) -> Vec<(usize, f64)> {
    let (indices, distances) = hits.row(q);
    indices.iter().copied().zip(distances.iter().copied()).collect()
}

/// Checks the tree's answers for every query row against the exhaustive
/// scan.
pub fn check_knn<M: Metric>(tree: &BallTree<M>, queries: &RowMajor, k: usize) {
    let hits = tree.query(queries, k).unwrap();
    for q in 0..queries.cardinality() {
        let truth = knn_linear::search(tree.data(), tree.metric(), queries.row(q), k);
        let label = format!("{} k={k} q={q}", tree.metric().name());
        assert_same_distances(&row_hits(&hits, q), &truth, &label);
    }
}
