//! Data generation utilities for testing.

use ball_tree::RowMajor;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A small planar set with one far outlier.
pub fn gen_tiny_data() -> RowMajor {
    RowMajor::from_rows(vec![
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 1.0],
        vec![10.0, 10.0],
    ])
    .unwrap()
}

/// A 1-dimensional line of integer coordinates `0..n`.
pub fn gen_line_data(n: usize) -> RowMajor {
    RowMajor::from_rows((0..n).map(|i| vec![i as f64]).collect()).unwrap()
}

/// Uniform random tabular data in `[-1, 1]`.
pub fn gen_random_data(cardinality: usize, dimensionality: usize, seed: u64) -> RowMajor {
    let rows = symagen::random_data::random_tabular_seedable::<f64>(
        cardinality,
        dimensionality,
        -1.0,
        1.0,
        seed,
    );
    RowMajor::from_rows(rows).unwrap()
}

/// Random rows over the tiny alphabet `{0, 1, 2}`, for the Hamming metric.
pub fn gen_categorical_data(cardinality: usize, dimensionality: usize, seed: u64) -> RowMajor {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..cardinality)
        .map(|_| (0..dimensionality).map(|_| f64::from(rng.gen_range(0_u8..3))).collect())
        .collect();
    RowMajor::from_rows(rows).unwrap()
}

/// `cardinality` copies of the same point.
pub fn gen_identical_data(cardinality: usize, dimensionality: usize) -> RowMajor {
    RowMajor::from_rows(vec![vec![3.5; dimensionality]; cardinality]).unwrap()
}
