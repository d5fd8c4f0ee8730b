//! Solver-independent MILP representation.
//!
//! Models are plain owned data: variables with domains, named linear
//! constraints and a linear objective. Solver backends translate them at
//! solve time.

mod expr;
mod model;

pub use expr::{LinearExpr, VarId};
pub use model::{Constraint, MilpModel, ObjectiveSense, Relation, VarDomain, VariableDef};
