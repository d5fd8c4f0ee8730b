//! Travel time and travel cost matrices.
//!
//! Provides a dense directed weight matrix shared by both.

mod matrix;

pub use matrix::CostMatrix;
