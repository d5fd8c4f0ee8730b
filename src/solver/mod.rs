//! External MILP solver access.
//!
//! - [`SolverAdapter`] — preferred solver first, one default-solver retry
//! - [`MilpBackend`] — backend interface; [`GoodLpBackend`] wraps `good_lp`
//! - [`SolverConfig`] — solver choice, verbosity and pass-through options

mod adapter;
mod backend;
mod config;

pub use adapter::{SolverAdapter, LOOSE_TOLERANCE, STRICT_TOLERANCE};
pub use backend::{GoodLpBackend, MilpBackend, RawResult};
pub use config::{SolverConfig, SolverKind, SolverOptions, UnknownSolver};
