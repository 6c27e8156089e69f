//! A `RowMajor` matrix is the dataset format consumed by the index.

use crate::core::metric::Metric;

/// A contiguous row-major `N x D` matrix of `f64` values.
///
/// This is the format in which both indexed data and query batches are
/// supplied. The buffer is owned by the matrix and never mutated after
/// construction.
///
/// Values are not sanitized: a NaN coordinate propagates into every distance
/// it touches and degrades query pruning toward a linear scan.
///
/// # Example
///
/// ```rust
/// use ball_tree::RowMajor;
///
/// let data = RowMajor::new(vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0], 2).unwrap();
/// assert_eq!(data.cardinality(), 3);
/// assert_eq!(data.dimensionality(), 2);
/// assert_eq!(data.row(1), &[1.0, 1.0]);
///
/// assert!(RowMajor::new(Vec::new(), 2).is_err());
/// ```
#[derive(Clone)]
pub struct RowMajor {
    /// The values of the matrix, row by row.
    values: Vec<f64>,
    /// The number of rows.
    cardinality: usize,
    /// The number of columns.
    dimensionality: usize,
    /// The name of the dataset.
    name: String,
}

impl RowMajor {
    /// Creates a new `RowMajor` matrix from a flat buffer.
    ///
    /// # Arguments
    ///
    /// - `values`: The values of the matrix, row by row.
    /// - `dimensionality`: The number of columns.
    ///
    /// # Errors
    ///
    /// * If `values` is empty.
    /// * If `dimensionality` is zero.
    /// * If the buffer length is not a multiple of `dimensionality`.
    pub fn new(values: Vec<f64>, dimensionality: usize) -> Result<Self, String> {
        if dimensionality == 0 {
            return Err("The dimensionality must be positive.".to_string());
        }
        if values.is_empty() {
            return Err("The matrix is empty.".to_string());
        }
        if values.len() % dimensionality != 0 {
            return Err(format!(
                "The buffer length {} is not a multiple of the dimensionality {dimensionality}.",
                values.len()
            ));
        }
        let cardinality = values.len() / dimensionality;
        Ok(Self {
            values,
            cardinality,
            dimensionality,
            name: "Unknown RowMajor".to_string(),
        })
    }

    /// Creates a new `RowMajor` matrix from nested rows.
    ///
    /// # Errors
    ///
    /// * If `rows` is empty or its rows are empty.
    /// * If the rows do not all have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, String> {
        let dimensionality = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != dimensionality) {
            return Err("The rows do not all have the same length.".to_string());
        }
        let values = rows.into_iter().flatten().collect();
        Self::new(values, dimensionality)
    }

    /// Changes the name of the dataset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ball_tree::RowMajor;
    ///
    /// let queries = RowMajor::new(vec![1.0, 2.0], 2).unwrap().with_name("queries");
    /// assert_eq!(queries.name(), "queries");
    /// ```
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Returns the name of the dataset.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// Returns the flat buffer, row by row.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the row at the given index. May panic if the index is out of
    /// bounds.
    #[must_use]
    pub fn row(&self, index: usize) -> &[f64] {
        &self.values[index * self.dimensionality..(index + 1) * self.dimensionality]
    }

    /// Computes the distances from `query` to each of the rows at `indices`.
    ///
    /// This is the pairwise-to-one kernel: the builder uses it for its
    /// farthest-point passes and radius computations, and the linear
    /// baseline for its scan. The inner loop runs over contiguous rows and
    /// is the natural target for auto-vectorization.
    pub fn one_to_many<M: Metric + ?Sized>(&self, query: &[f64], indices: &[usize], metric: &M) -> Vec<f64> {
        indices.iter().map(|&i| metric.distance(query, self.row(i))).collect()
    }
}
