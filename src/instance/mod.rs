//! Instance generation.

mod synthetic;

pub use synthetic::{generate_synthetic, SyntheticConfig};
