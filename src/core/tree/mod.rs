//! A ball tree over a row-major dataset.

mod build;

use rand::{rngs::StdRng, SeedableRng};

use crate::core::{dataset::RowMajor, metric::Metric};

/// A ball tree: a hierarchy of bounding balls over a fixed dataset, queried
/// with triangle-inequality pruning.
///
/// The tree is immutable after construction. Points are never copied into
/// nodes; instead each node owns a contiguous range of a shared permutation
/// of `0..N`, and sibling ranges are disjoint. Nodes live in flat arrays
/// addressed breadth-first: the root is node `0` and the children of node
/// `v` are `2v + 1` and `2v + 2`. The arrays are sized for a perfect binary
/// tree; slots never reached from the root are left zero-initialized.
///
/// # Example
///
/// ```rust
/// use ball_tree::{metric::Manhattan, BallTree, RowMajor};
///
/// let data = RowMajor::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 1).unwrap();
/// let tree = BallTree::build(data, Manhattan, 2, Some(42)).unwrap();
///
/// assert_eq!(tree.height(), 3);
/// assert_eq!(tree.node_count(), 7);
/// assert!(!tree.node(0).unwrap().is_leaf());
/// ```
pub struct BallTree<M> {
    /// The indexed dataset.
    data: RowMajor,
    /// The metric under which the tree was built.
    metric: M,
    /// The maximum number of points stored in any leaf.
    leaf_size: usize,
    /// A permutation of `0..N`. Each node owns a contiguous range of it.
    perm: Vec<usize>,
    /// The number of levels in the tree.
    height: usize,
    /// The per-node state arrays.
    pub(crate) nodes: NodeArrays,
}

impl<M: Metric> BallTree<M> {
    /// Builds a ball tree over `data` under `metric`.
    ///
    /// This is the only constructor: every reachable `BallTree` value is
    /// fully built, so there is no unbuilt state to query by mistake.
    ///
    /// # Arguments
    ///
    /// - `data`: The dataset to index. Owned by the tree for its lifetime.
    /// - `metric`: The distance function for both construction and queries.
    /// - `leaf_size`: The maximum number of points stored in any leaf.
    /// - `seed`: An optional seed for the random pivot choices; builds with
    ///   the same seed produce the same tree.
    ///
    /// # Errors
    ///
    /// * If `leaf_size` is zero.
    pub fn build(data: RowMajor, metric: M, leaf_size: usize, seed: Option<u64>) -> Result<Self, String> {
        if leaf_size == 0 {
            return Err("The leaf size must be positive.".to_string());
        }

        let (height, node_count) = shape(data.cardinality(), leaf_size);
        let mut perm = (0..data.cardinality()).collect::<Vec<_>>();
        let mut nodes = NodeArrays::new(node_count, data.dimensionality());
        let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        build::build_range(
            &data,
            &metric,
            leaf_size,
            &mut nodes,
            &mut perm,
            0,
            0,
            data.cardinality() - 1,
            &mut rng,
        );

        Ok(Self {
            data,
            metric,
            leaf_size,
            perm,
            height,
            nodes,
        })
    }

    /// Returns the indexed dataset.
    #[must_use]
    pub const fn data(&self) -> &RowMajor {
        &self.data
    }

    /// Returns the metric under which the tree was built.
    #[must_use]
    pub const fn metric(&self) -> &M {
        &self.metric
    }

    /// Returns the maximum number of points stored in any leaf.
    #[must_use]
    pub const fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// Returns the permutation of `0..N` that assigns points to nodes.
    #[must_use]
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Returns the number of levels in the tree.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of node slots, `2^height - 1`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns a view of the node at the given breadth-first index, or
    /// `None` if the index is out of bounds.
    #[must_use]
    pub fn node(&self, v: usize) -> Option<NodeView<'_>> {
        (v < self.nodes.len()).then(|| NodeView {
            center: self.nodes.center(v),
            radius: self.nodes.radius(v),
            range: self.nodes.range(v),
            is_leaf: self.nodes.is_leaf(v),
        })
    }
}

/// A read-only view of one node of a [`BallTree`].
pub struct NodeView<'a> {
    /// The center of the ball.
    center: &'a [f64],
    /// The radius of the ball.
    radius: f64,
    /// The inclusive range of the permutation owned by the node.
    range: (usize, usize),
    /// Whether the node is a leaf.
    is_leaf: bool,
}

impl<'a> NodeView<'a> {
    /// The center of the ball: the coordinate-wise mean of its points.
    #[must_use]
    pub const fn center(&self) -> &'a [f64] {
        self.center
    }

    /// The radius of the ball: the distance from the center to its farthest
    /// point.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// The inclusive `(lo, hi)` range of the permutation owned by the node.
    #[must_use]
    pub const fn data_range(&self) -> (usize, usize) {
        self.range
    }

    /// Whether the node is a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.is_leaf
    }
}

/// The per-node state of a tree, as flat arrays indexed breadth-first.
pub(crate) struct NodeArrays {
    /// The dimensionality of the centers.
    dimensionality: usize,
    /// The centers of the balls, `node_count * dimensionality` values.
    centers: Vec<f64>,
    /// The radii of the balls.
    radii: Vec<f64>,
    /// The inclusive lower bound of each node's permutation range.
    range_lo: Vec<usize>,
    /// The inclusive upper bound of each node's permutation range.
    range_hi: Vec<usize>,
    /// Whether each node is a leaf.
    leaf: Vec<bool>,
}

impl NodeArrays {
    /// Allocates zero-initialized arrays for `node_count` nodes.
    fn new(node_count: usize, dimensionality: usize) -> Self {
        Self {
            dimensionality,
            centers: vec![0.0; node_count * dimensionality],
            radii: vec![0.0; node_count],
            range_lo: vec![0; node_count],
            range_hi: vec![0; node_count],
            leaf: vec![false; node_count],
        }
    }

    /// The number of node slots.
    pub(crate) fn len(&self) -> usize {
        self.radii.len()
    }

    /// The center of node `v`.
    pub(crate) fn center(&self, v: usize) -> &[f64] {
        &self.centers[v * self.dimensionality..(v + 1) * self.dimensionality]
    }

    /// The radius of node `v`.
    pub(crate) fn radius(&self, v: usize) -> f64 {
        self.radii[v]
    }

    /// The inclusive `(lo, hi)` permutation range of node `v`.
    pub(crate) fn range(&self, v: usize) -> (usize, usize) {
        (self.range_lo[v], self.range_hi[v])
    }

    /// Whether node `v` is a leaf.
    pub(crate) fn is_leaf(&self, v: usize) -> bool {
        self.leaf[v]
    }

    /// Writes the ball and range of node `v`.
    fn set(&mut self, v: usize, center: &[f64], radius: f64, lo: usize, hi: usize) {
        self.centers[v * self.dimensionality..(v + 1) * self.dimensionality].copy_from_slice(center);
        self.radii[v] = radius;
        self.range_lo[v] = lo;
        self.range_hi[v] = hi;
    }

    /// Marks node `v` as a leaf.
    fn set_leaf(&mut self, v: usize) {
        self.leaf[v] = true;
    }
}

/// Returns `(height, node_count)` for `cardinality` points with the given
/// leaf size.
///
/// The tree is perfect by capacity: `node_count = 2^height - 1`, where the
/// height is the smallest number of levels whose leaves can hold every
/// point. A dataset that fits in one leaf gets a single-node tree.
const fn shape(cardinality: usize, leaf_size: usize) -> (usize, usize) {
    let mut height = 1;
    let mut capacity = leaf_size;
    while capacity < cardinality {
        capacity *= 2;
        height += 1;
    }
    (height, (1 << height) - 1)
}
