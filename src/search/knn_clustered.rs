//! K-Nearest Neighbors search by pruned descent of the tree.

use crate::core::{metric::Metric, tree::BallTree};

use super::heap::BoundedHeap;

/// Searches one query row, writing the `k` nearest neighbors into the given
/// output slices in heap order: slot 0 of `distances` ends up holding the
/// largest of the `k`.
pub(crate) fn search_into<M: Metric>(
    tree: &BallTree<M>,
    query: &[f64],
    distances: &mut [f64],
    indices: &mut [usize],
) {
    let mut hits = BoundedHeap::new(distances, indices);
    // Pruning is only sound under the triangle inequality; without it every
    // ball must be visited.
    let prune = tree.metric().obeys_triangle_inequality();
    let dc = tree.metric().distance(query, tree.nodes.center(0));
    descend(tree, 0, dc, query, &mut hits, prune);
}

/// Visits node `v`, given the precomputed distance `dc` from the query to
/// its center.
///
/// By the triangle inequality, every point in a ball of radius `r` around
/// `c` is at least `d(q, c) - r` from the query, so a subtree whose bound
/// already exceeds the current `k`-th best cannot improve the heap and is
/// skipped.
fn descend<M: Metric>(
    tree: &BallTree<M>,
    v: usize,
    dc: f64,
    query: &[f64],
    hits: &mut BoundedHeap<'_>,
    prune: bool,
) {
    if prune && dc - tree.nodes.radius(v) > hits.head() {
        return;
    }

    if tree.nodes.is_leaf(v) {
        let (lo, hi) = tree.nodes.range(v);
        for &p in &tree.permutation()[lo..=hi] {
            let d = tree.metric().distance(tree.data().row(p), query);
            hits.push_if_better(d, p);
        }
    } else {
        let (l, r) = (2 * v + 1, 2 * v + 2);
        let dl = tree.metric().distance(query, tree.nodes.center(l));
        let dr = tree.metric().distance(query, tree.nodes.center(r));
        // The nearer child goes first so that its points tighten the k-th
        // best before the farther subtree is considered.
        if dl <= dr {
            descend(tree, l, dl, query, hits, prune);
            descend(tree, r, dr, query, hits, prune);
        } else {
            descend(tree, r, dr, query, hits, prune);
            descend(tree, l, dl, query, hits, prune);
        }
    }
}
