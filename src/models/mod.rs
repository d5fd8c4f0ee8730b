//! Domain model types for trip planning.
//!
//! Provides cities with stay rates and bounds, the planning instance that
//! ties cities to travel matrices and budgets, and the solution returned
//! by the planner.

mod city;
mod itinerary;
mod solution;

pub use city::City;
pub use itinerary::ItineraryData;
pub use solution::{ItinerarySolution, SolutionSummary, SolveStatus};
