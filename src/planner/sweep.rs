//! Budget sensitivity sweeps.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ItineraryPlanner;
use crate::error::{TripError, ValidationError};
use crate::models::ItineraryData;
use crate::solver::MilpBackend;

/// Sweep range configuration.
///
/// Budgets are `n_points` evenly spaced values over
/// `[budget · factor_low, budget · factor_high]`, both ends inclusive.
///
/// # Examples
///
/// ```
/// use u_itinerary::planner::SweepConfig;
///
/// let config = SweepConfig::default().with_points(3).with_factors(0.5, 1.5);
/// assert_eq!(config.budgets(100.0), vec![50.0, 100.0, 150.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Number of budgets to solve.
    pub n_points: usize,
    /// Lower end of the range, as a fraction of the base budget.
    pub factor_low: f64,
    /// Upper end of the range, as a fraction of the base budget.
    pub factor_high: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            n_points: 6,
            factor_low: 0.6,
            factor_high: 1.4,
        }
    }
}

impl SweepConfig {
    /// Sets the number of points.
    pub fn with_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    /// Sets both range factors.
    pub fn with_factors(mut self, low: f64, high: f64) -> Self {
        self.factor_low = low;
        self.factor_high = high;
        self
    }

    /// Checks that the factors form a positive, ascending range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let (low, high) = (self.factor_low, self.factor_high);
        if !low.is_finite() || !high.is_finite() || low <= 0.0 || low > high {
            return Err(ValidationError::InvalidSweep { low, high });
        }
        Ok(())
    }

    /// The budgets this configuration visits for a base budget, ascending.
    pub fn budgets(&self, base: f64) -> Vec<f64> {
        let lo = base * self.factor_low;
        let hi = base * self.factor_high;
        match self.n_points {
            0 => Vec::new(),
            1 => vec![lo],
            n => {
                let step = (hi - lo) / (n - 1) as f64;
                (0..n)
                    .map(|k| if k == n - 1 { hi } else { lo + step * k as f64 })
                    .collect()
            }
        }
    }
}

/// Objective value per swept budget.
///
/// `objectives[k]` is `None` when the solve at `budgets[k]` did not end
/// optimal (typically infeasible at low budgets).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetSweep {
    /// Budgets, ascending.
    pub budgets: Vec<f64>,
    /// Objective at each budget.
    pub objectives: Vec<Option<f64>>,
}

impl BudgetSweep {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    /// Whether the sweep has no points.
    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    /// `(budget, objective)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, Option<f64>)> + '_ {
        self.budgets.iter().copied().zip(self.objectives.iter().copied())
    }

    /// Only the points with an optimal objective.
    pub fn feasible_points(&self) -> Vec<(f64, f64)> {
        self.points()
            .filter_map(|(b, obj)| obj.map(|o| (b, o)))
            .collect()
    }

    /// Whether feasible objectives never drop by more than `tol` as the
    /// budget grows.
    pub fn is_non_decreasing(&self, tol: f64) -> bool {
        self.feasible_points()
            .windows(2)
            .all(|w| w[1].1 >= w[0].1 - tol)
    }
}

/// Re-solves `data` across a range of budgets.
///
/// Every point solves an independent copy of `data` with only the budget
/// replaced; points run in order with no warm start. Non-optimal points
/// are recorded as `None` and the sweep continues.
///
/// # Errors
///
/// Fails with [`ValidationError::InvalidSweep`] for a bad range, with any
/// other [`ValidationError`] if `data` is malformed, and with
/// [`TripError::Solver`] as soon as a point cannot be solved at all.
///
/// # Examples
///
/// ```
/// use u_itinerary::distance::CostMatrix;
/// use u_itinerary::models::{City, ItineraryData};
/// use u_itinerary::planner::{sweep_budget, ItineraryPlanner, SweepConfig};
/// use u_itinerary::solver::SolverConfig;
///
/// let data = ItineraryData::new(
///     vec![City::home("Home"), City::new("A", 10.0, 5.0, 1, 5)],
///     CostMatrix::uniform(2, 1.0),
///     CostMatrix::uniform(2, 10.0),
///     50.0,
///     10.0,
/// );
/// let planner = ItineraryPlanner::good_lp(SolverConfig::default());
/// let sweep = sweep_budget(&planner, &data, &SweepConfig::default()).expect("valid");
/// assert_eq!(sweep.len(), 6);
/// assert!(sweep.is_non_decreasing(1e-6));
/// ```
pub fn sweep_budget<B: MilpBackend>(
    planner: &ItineraryPlanner<B>,
    data: &ItineraryData,
    config: &SweepConfig,
) -> Result<BudgetSweep, TripError> {
    config.validate()?;
    data.validate()?;

    let budgets = config.budgets(data.budget());
    let mut objectives = Vec::with_capacity(budgets.len());
    for (k, &budget) in budgets.iter().enumerate() {
        let solution = planner.solve(&data.with_budget(budget))?;
        let objective = if solution.is_optimal() {
            solution.objective_value()
        } else {
            None
        };
        debug!(
            point = k + 1,
            of = budgets.len(),
            budget,
            status = %solution.status(),
            objective = ?objective,
            "sweep point solved"
        );
        objectives.push(objective);
    }

    Ok(BudgetSweep {
        budgets,
        objectives,
    })
}
