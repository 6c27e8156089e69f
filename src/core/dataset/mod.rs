//! The dataset formats consumed by the index.

mod row_major;

pub use row_major::RowMajor;
