//! End-to-end planning.
//!
//! - [`ItineraryPlanner`] / [`solve_itinerary`] — build, solve and assemble one instance
//! - [`sweep_budget`] — re-solve across a range of budgets

mod pipeline;
mod sweep;

pub use pipeline::{solve_itinerary, ItineraryPlanner};
pub use sweep::{sweep_budget, BudgetSweep, SweepConfig};
