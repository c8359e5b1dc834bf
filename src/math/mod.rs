//! Small dense linear-algebra types used by the network.
//!
//! Provides `Vector` (1D) and `Matrix` (2D, stored as rows of `Vector`s)
//! with the handful of operations backpropagation needs. These types are
//! intentionally small and dependency-free to keep the crate portable and
//! easy to test; all accessors hand out copies or borrows, never aliased
//! live references into another value's storage.
pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
