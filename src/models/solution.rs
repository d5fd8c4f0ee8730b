//! Solve status and itinerary solution types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ItineraryData;

/// Terminal status of one solve.
///
/// Solver backends translate their native outcomes into this enum; nothing
/// outside the solver module sees library-specific codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// Optimal, but the returned point violates the model by more than the
    /// strict tolerance.
    OptimalInaccurate,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The objective can grow without bound.
    Unbounded,
    /// The solver failed without a verdict.
    SolverError,
    /// Any other outcome, including points that are too far off to trust.
    Other,
}

impl SolveStatus {
    /// Returns `true` for the statuses that carry a usable solution.
    pub fn is_optimal(self) -> bool {
        matches!(self, Self::Optimal | Self::OptimalInaccurate)
    }

    /// Lower-case name, e.g. `optimal_inaccurate`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::OptimalInaccurate => "optimal_inaccurate",
            Self::Infeasible => "infeasible",
            Self::Unbounded => "unbounded",
            Self::SolverError => "solver_error",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of planning one itinerary.
///
/// When the status is not an optimal kind, the objective and every
/// breakdown field are `None` and the index lists are empty.
///
/// # Examples
///
/// ```
/// use u_itinerary::models::{ItinerarySolution, SolveStatus};
///
/// let sol = ItinerarySolution::without_solution(SolveStatus::Infeasible);
/// assert!(!sol.is_optimal());
/// assert!(sol.objective_value().is_none());
/// assert!(sol.route_indices().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItinerarySolution {
    pub(crate) status: SolveStatus,
    pub(crate) objective_value: Option<f64>,
    pub(crate) selected_indices: Vec<usize>,
    pub(crate) route_indices: Vec<usize>,
    pub(crate) stay_days: Option<Vec<u32>>,
    pub(crate) total_time: Option<f64>,
    pub(crate) total_cost: Option<f64>,
    pub(crate) stay_cost: Option<f64>,
    pub(crate) travel_cost: Option<f64>,
}

impl ItinerarySolution {
    /// Creates a solution that carries only a status.
    pub fn without_solution(status: SolveStatus) -> Self {
        Self {
            status,
            objective_value: None,
            selected_indices: Vec::new(),
            route_indices: Vec::new(),
            stay_days: None,
            total_time: None,
            total_cost: None,
            stay_cost: None,
            travel_cost: None,
        }
    }

    /// Terminal solve status.
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Returns `true` if the status is an optimal kind.
    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    /// Enjoyment minus travel-time penalty, if solved.
    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    /// Visited non-home cities, ascending.
    pub fn selected_indices(&self) -> &[usize] {
        &self.selected_indices
    }

    /// Visit order starting at home; ends at home iff the tour closed.
    pub fn route_indices(&self) -> &[usize] {
        &self.route_indices
    }

    /// Returns `true` if the route is a closed tour through home.
    pub fn is_closed_tour(&self) -> bool {
        crate::evaluation::is_closed_tour(&self.route_indices)
    }

    /// Days spent in each city (index 0 = home, always 0).
    pub fn stay_days(&self) -> Option<&[u32]> {
        self.stay_days.as_deref()
    }

    /// Stay days plus travel time.
    pub fn total_time(&self) -> Option<f64> {
        self.total_time
    }

    /// Stay cost plus travel cost.
    pub fn total_cost(&self) -> Option<f64> {
        self.total_cost
    }

    /// Money spent on stays.
    pub fn stay_cost(&self) -> Option<f64> {
        self.stay_cost
    }

    /// Money spent on travel.
    pub fn travel_cost(&self) -> Option<f64> {
        self.travel_cost
    }

    /// Returns a printable summary using the city names of `data`.
    pub fn describe<'a>(&'a self, data: &'a ItineraryData) -> SolutionSummary<'a> {
        SolutionSummary {
            solution: self,
            data,
        }
    }
}

/// Human-readable report of a solution, created by
/// [`ItinerarySolution::describe`].
pub struct SolutionSummary<'a> {
    solution: &'a ItinerarySolution,
    data: &'a ItineraryData,
}

impl fmt::Display for SolutionSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sol = self.solution;
        writeln!(f, "status: {}", sol.status)?;
        let Some(objective) = sol.objective_value else {
            return writeln!(f, "no itinerary");
        };
        writeln!(f, "objective: {objective:.2}")?;

        let cities = self.data.cities();
        let names: Vec<&str> = sol
            .route_indices
            .iter()
            .map(|&i| cities.get(i).map_or("?", |c| c.name()))
            .collect();
        writeln!(f, "route: {}", names.join(" -> "))?;
        if !sol.is_closed_tour() {
            writeln!(f, "warning: route does not return home")?;
        }

        if let Some(stays) = &sol.stay_days {
            for &i in &sol.selected_indices {
                let name = cities.get(i).map_or("?", |c| c.name());
                writeln!(f, "  {name}: {} days", stays.get(i).copied().unwrap_or(0))?;
            }
        }
        if let (Some(time), Some(cost), Some(stay), Some(travel)) = (
            sol.total_time,
            sol.total_cost,
            sol.stay_cost,
            sol.travel_cost,
        ) {
            writeln!(
                f,
                "days: {time:.1} / {:.1}",
                self.data.total_trip_days()
            )?;
            writeln!(
                f,
                "cost: {cost:.2} / {:.2} (stay {stay:.2}, travel {travel:.2})",
                self.data.budget()
            )?;
        }
        Ok(())
    }
}
