//! Recursive construction of the tree arrays.

use distances::Number;
use rand::{rngs::StdRng, Rng};

use crate::{
    core::{dataset::RowMajor, metric::Metric},
    utils,
};

use super::NodeArrays;

/// Builds the subtree rooted at node `v` over the inclusive range
/// `[lo, hi]` of `perm`.
///
/// The permutation is shared across sibling recursions: each partition
/// mutates it in place, and a child must see the post-partition state of its
/// half. Ranges are therefore passed explicitly instead of slicing the
/// permutation apart.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_range<M: Metric>(
    data: &RowMajor,
    metric: &M,
    leaf_size: usize,
    nodes: &mut NodeArrays,
    perm: &mut [usize],
    v: usize,
    lo: usize,
    hi: usize,
    rng: &mut StdRng,
) {
    let span = hi - lo + 1;

    let center = centroid(data, &perm[lo..=hi]);
    let from_center = data.one_to_many(&center, &perm[lo..=hi], metric);
    let radius = utils::arg_max(&from_center).map_or(0.0, |(_, r)| r);
    nodes.set(v, &center, radius, lo, hi);

    // A range that fits the leaf bound stops here, as does any node whose
    // child slots would fall outside the allocated arrays. The second
    // condition cannot fire with the shape arithmetic in `shape`, but
    // unused slots are never trusted to be unreachable.
    if span <= leaf_size || 2 * v + 2 >= nodes.len() {
        nodes.set_leaf(v);
        return;
    }

    // Two farthest-point passes approximate the diameter of the range: a
    // random point, the point farthest from it, and the point farthest from
    // that. Ties go to the first point encountered.
    let r = rng.gen_range(lo..=hi);
    let from_x0 = data.one_to_many(data.row(perm[r]), &perm[lo..=hi], metric);
    let i1 = utils::arg_max(&from_x0).map_or(0, |(i, _)| i);
    let x1 = data.row(perm[lo + i1]);
    let from_x1 = data.one_to_many(x1, &perm[lo..=hi], metric);
    let i2 = utils::arg_max(&from_x1).map_or(0, |(i, _)| i);
    let x2 = data.row(perm[lo + i2]);

    // Project every point onto the unnormalized `x1 - x2` axis and split
    // the range at the median projection. The selection swaps `perm` in
    // lockstep, so the left child receives exactly `mid` points even when
    // projections tie.
    let axis = x1.iter().zip(x2.iter()).map(|(a, b)| a - b).collect::<Vec<_>>();
    let mut proj = perm[lo..=hi]
        .iter()
        .map(|&p| dot(data.row(p), &axis))
        .collect::<Vec<_>>();
    let mid = span / 2;
    select_nth(&mut proj, &mut perm[lo..=hi], mid);

    build_range(data, metric, leaf_size, nodes, perm, 2 * v + 1, lo, lo + mid - 1, rng);
    build_range(data, metric, leaf_size, nodes, perm, 2 * v + 2, lo + mid, hi, rng);
}

/// The coordinate-wise arithmetic mean of the rows at `indices`.
fn centroid(data: &RowMajor, indices: &[usize]) -> Vec<f64> {
    let mut center = vec![0.0; data.dimensionality()];
    for &i in indices {
        for (c, x) in center.iter_mut().zip(data.row(i)) {
            *c += x;
        }
    }
    let n = indices.len().as_f64();
    for c in &mut center {
        *c /= n;
    }
    center
}

/// The dot product of two equal-length vectors.
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).fold(0.0, |acc, (&x, &y)| x.mul_add(y, acc))
}

/// Moves the `n`-th order statistic of `values` to position `n`, with every
/// value to its left `<=` it and every value to its right `>=` it.
///
/// Entries of `perm` are swapped in lockstep with `values`, so the
/// correspondence between the two slices is preserved and `perm` remains a
/// permutation of its original contents. The split is exact even when
/// `values` holds duplicates of the selected value.
fn select_nth(values: &mut [f64], perm: &mut [usize], n: usize) {
    let mut lo = 0;
    let mut hi = values.len() - 1;
    while lo < hi {
        let p = partition(values, perm, lo, hi);
        if n <= p {
            hi = p;
        } else {
            lo = p + 1;
        }
    }
}

/// Hoare partition of `values[lo..=hi]`, and of `perm` in lockstep, around
/// the value at the middle of the range.
///
/// Returns `j` in `[lo, hi)` such that `values[lo..=j]` are all `<=` the
/// pivot and `values[j + 1..=hi]` are all `>=` it. The strict comparisons in
/// the scan loops make the pointers meet near the middle on all-equal
/// ranges, so the caller's split stays balanced on degenerate input.
fn partition(values: &mut [f64], perm: &mut [usize], lo: usize, hi: usize) -> usize {
    let pivot = values[lo + (hi - lo) / 2];
    let mut i = lo;
    let mut j = hi;
    loop {
        while values[i] < pivot {
            i += 1;
        }
        while values[j] > pivot {
            j -= 1;
        }
        if i >= j {
            return j;
        }
        values.swap(i, j);
        perm.swap(i, j);
        i += 1;
        j -= 1;
    }
}
