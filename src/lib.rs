//! # u-itinerary
//!
//! Trip itinerary planning as a mixed-integer linear program: choose which
//! cities to visit, in what order, and for how many days, maximizing
//! enjoyment under a cost budget and a trip-length limit.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (City, ItineraryData, ItinerarySolution, SolveStatus)
//! - [`distance`] — Travel time and travel cost matrices
//! - [`milp`] — Solver-independent MILP representation
//! - [`formulation`] — Itinerary MILP construction with MTZ subtour elimination
//! - [`solver`] — Solver backends and the preferred-then-default fallback adapter
//! - [`evaluation`] — Route reconstruction and solution assembly
//! - [`planner`] — End-to-end solve and budget sensitivity sweeps
//! - [`instance`] — Seeded synthetic instances
//! - [`error`] — Validation and solver invocation errors

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod formulation;
pub mod instance;
pub mod milp;
pub mod models;
pub mod planner;
pub mod solver;

#[cfg(test)]
mod test_support;
