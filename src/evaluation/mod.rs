//! Solution reconstruction.
//!
//! - [`reconstruct_route`] — decode the arc matrix into a visit order
//! - [`assemble_solution`] — round raw values and derive cost/time breakdowns

mod assemble;
mod route;

pub use assemble::assemble_solution;
pub use route::{is_closed_tour, reconstruct_route, ArcMatrix};
