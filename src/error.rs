//! Error types.
//!
//! Infeasible and unbounded models are not errors: they come back as a
//! [`SolveStatus`](crate::models::SolveStatus) on the solution.

use thiserror::Error;

use crate::solver::SolverKind;

/// Malformed input detected before any solver is invoked.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Fewer than two cities (home plus at least one destination).
    #[error("at least 2 cities are required, got {0}")]
    TooFewCities(usize),

    /// A matrix does not match the number of cities.
    #[error("{what} is {actual}x{actual}, expected {expected}x{expected}")]
    DimensionMismatch {
        /// Which matrix is malformed.
        what: &'static str,
        /// Expected side length (number of cities).
        expected: usize,
        /// Actual side length.
        actual: usize,
    },

    /// A cost or time entry is negative.
    #[error("{what}[{from}][{to}] = {value} is negative")]
    NegativeWeight {
        /// Which matrix or rate holds the entry.
        what: &'static str,
        /// Row (or city) index.
        from: usize,
        /// Column index (equal to `from` for per-city rates).
        to: usize,
        /// Offending value.
        value: f64,
    },

    /// A numeric field is NaN or infinite.
    #[error("{what} must be finite")]
    NonFinite {
        /// Name of the field.
        what: &'static str,
    },

    /// `min_stay > max_stay` for a destination city.
    #[error("city {city}: min_stay {min} exceeds max_stay {max}")]
    InvertedStayBounds {
        /// City index.
        city: usize,
        /// Minimum stay.
        min: u32,
        /// Maximum stay.
        max: u32,
    },

    /// A field that must be strictly positive is not.
    #[error("{what} must be positive, got {value}")]
    NonPositive {
        /// Name of the field.
        what: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Sweep factors are not a valid positive, ascending range.
    #[error("invalid sweep range [{low}, {high}]")]
    InvalidSweep {
        /// Lower budget factor.
        low: f64,
        /// Upper budget factor.
        high: f64,
    },
}

/// The solver could not be run at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverInvocationError {
    /// The requested backend is not compiled into this build.
    #[error("solver {solver} is not available in this build")]
    Unavailable {
        /// Requested solver.
        solver: SolverKind,
    },

    /// The backend ran but failed without a mathematical verdict.
    #[error("solver {solver} failed: {message}")]
    Rejected {
        /// Solver that failed.
        solver: SolverKind,
        /// Backend message.
        message: String,
    },
}

/// Errors returned by the planning pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripError {
    /// Input data failed validation.
    #[error("invalid itinerary data: {0}")]
    Validation(#[from] ValidationError),

    /// Neither the preferred nor the default solver could run.
    #[error("solver invocation failed: {0}")]
    Solver(#[from] SolverInvocationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let e = ValidationError::InvertedStayBounds {
            city: 2,
            min: 5,
            max: 3,
        };
        assert_eq!(e.to_string(), "city 2: min_stay 5 exceeds max_stay 3");
    }

    #[test]
    fn test_trip_error_from() {
        let e: TripError = SolverInvocationError::Unavailable {
            solver: SolverKind::CoinCbc,
        }
        .into();
        assert!(matches!(e, TripError::Solver(_)));
        assert!(e.to_string().contains("coin_cbc"));
    }
}
