//! Batch k-nearest-neighbor queries over a built tree.

mod heap;
mod knn_clustered;
pub mod knn_linear;

pub use heap::BoundedHeap;

use rayon::prelude::*;

use crate::core::{dataset::RowMajor, metric::Metric, tree::BallTree};

/// The results of a batch query: the `k` nearest neighbors of each of `Q`
/// query rows.
///
/// Both buffers are flat `Q x k` matrices in row-major order. Each row is in
/// heap order: slot 0 of a distance row holds the largest of that row's `k`
/// distances, and no other order is imposed. Callers wanting fully sorted
/// rows sort externally. The `indices` entry at a position names the dataset
/// row whose distance is at the same position.
pub struct Neighbors {
    /// The number of neighbors per query row.
    k: usize,
    /// The dataset indices of the neighbors, `Q x k` row-major.
    indices: Vec<usize>,
    /// The distances to the neighbors, `Q x k` row-major.
    distances: Vec<f64>,
}

impl Neighbors {
    /// Returns the number of query rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len() / self.k
    }

    /// Returns whether there are no query rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Returns the number of neighbors per query row.
    #[must_use]
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Returns the `(indices, distances)` slices of one query row. May
    /// panic if the row is out of bounds.
    #[must_use]
    pub fn row(&self, q: usize) -> (&[usize], &[f64]) {
        let range = q * self.k..(q + 1) * self.k;
        (&self.indices[range.clone()], &self.distances[range])
    }

    /// Returns the flat `Q x k` index buffer.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the flat `Q x k` distance buffer.
    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Consumes the results and returns the `(indices, distances)` buffers.
    #[must_use]
    pub fn into_parts(self) -> (Vec<usize>, Vec<f64>) {
        (self.indices, self.distances)
    }
}

impl<M: Metric> BallTree<M> {
    /// Validates the shape of a query batch against the indexed data.
    fn check_query(&self, queries: &RowMajor, k: usize) -> Result<(), String> {
        if queries.dimensionality() != self.data().dimensionality() {
            return Err(format!(
                "The query dimensionality {} does not match the indexed dimensionality {}.",
                queries.dimensionality(),
                self.data().dimensionality()
            ));
        }
        if k == 0 || k > self.data().cardinality() {
            return Err(format!(
                "k must be in 1..={}, got {k}.",
                self.data().cardinality()
            ));
        }
        Ok(())
    }

    /// Finds the `k` nearest indexed points to each row of `queries`.
    ///
    /// Rows are processed in sequence; see [`par_query`](Self::par_query)
    /// for the parallel version. The returned rows are in heap order, with
    /// the largest of each row's `k` distances in slot 0.
    ///
    /// # Errors
    ///
    /// * If the query dimensionality differs from the indexed
    ///   dimensionality.
    /// * If `k` is zero or exceeds the number of indexed points.
    pub fn query(&self, queries: &RowMajor, k: usize) -> Result<Neighbors, String> {
        self.check_query(queries, k)?;

        let mut indices = vec![0_usize; queries.cardinality() * k];
        let mut distances = vec![f64::INFINITY; queries.cardinality() * k];
        indices
            .chunks_exact_mut(k)
            .zip(distances.chunks_exact_mut(k))
            .enumerate()
            .for_each(|(q, (irow, drow))| knn_clustered::search_into(self, queries.row(q), drow, irow));

        Ok(Neighbors { k, indices, distances })
    }

    /// Parallel version of [`query`](Self::query).
    ///
    /// Queries are independent: each row writes to disjoint output slices
    /// and reads only the shared immutable tree, so the rows are simply
    /// distributed over the rayon thread pool.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub fn par_query(&self, queries: &RowMajor, k: usize) -> Result<Neighbors, String>
    where
        M: Send + Sync,
    {
        self.check_query(queries, k)?;

        let mut indices = vec![0_usize; queries.cardinality() * k];
        let mut distances = vec![f64::INFINITY; queries.cardinality() * k];
        indices
            .par_chunks_exact_mut(k)
            .zip(distances.par_chunks_exact_mut(k))
            .enumerate()
            .for_each(|(q, (irow, drow))| knn_clustered::search_into(self, queries.row(q), drow, irow));

        Ok(Neighbors { k, indices, distances })
    }
}
