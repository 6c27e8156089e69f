#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
#![doc = include_str!("../README.md")]

mod core;
pub mod search;
pub(crate) mod utils;

pub use crate::core::{
    dataset::RowMajor,
    metric::{self, Euclidean, Hamming, Manhattan, Metric},
    tree::{BallTree, NodeView},
};
pub use search::{knn_linear, BoundedHeap, Neighbors};

/// The current version of the crate.
pub const VERSION: &str = "0.1.0";
