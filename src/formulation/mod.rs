//! MILP formulation of the itinerary problem.
//!
//! - [`build_model`] — selection, routing, stay and MTZ ordering model

mod builder;

pub use builder::{build_model, ItineraryModel};
