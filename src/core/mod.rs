//! The core components of the index: the dataset, the metrics, and the tree.

pub mod dataset;
pub mod metric;
pub mod tree;
