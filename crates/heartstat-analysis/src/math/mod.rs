//! Dense row-major matrix used for pairwise statistics.
pub mod matrix;

pub use matrix::Array2;
