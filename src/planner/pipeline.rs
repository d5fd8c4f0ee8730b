//! The build → solve → assemble pipeline.

use tracing::debug;

use crate::error::TripError;
use crate::evaluation::assemble_solution;
use crate::formulation::build_model;
use crate::models::{ItineraryData, ItinerarySolution};
use crate::solver::{GoodLpBackend, MilpBackend, SolverAdapter, SolverConfig};

/// Plans itineraries with a fixed solver configuration.
///
/// Each call to [`solve`](Self::solve) builds a fresh model, so a planner
/// can be reused across instances (and across sweep points) without any
/// state carrying over.
///
/// # Examples
///
/// ```
/// use u_itinerary::distance::CostMatrix;
/// use u_itinerary::models::{City, ItineraryData, SolveStatus};
/// use u_itinerary::planner::ItineraryPlanner;
/// use u_itinerary::solver::SolverConfig;
///
/// let data = ItineraryData::new(
///     vec![
///         City::home("Home"),
///         City::new("A", 3.0, 10.0, 2, 4),
///         City::new("B", 3.0, 8.0, 2, 4),
///     ],
///     CostMatrix::uniform(3, 5.0),
///     CostMatrix::uniform(3, 5.0),
///     60.0,
///     25.0,
/// );
/// let planner = ItineraryPlanner::good_lp(SolverConfig::default());
/// let sol = planner.solve(&data).expect("valid instance");
/// assert_eq!(sol.status(), SolveStatus::Optimal);
/// assert_eq!(sol.selected_indices(), &[1, 2]);
/// assert_eq!(sol.stay_days(), Some(&[0, 4, 4][..]));
/// ```
#[derive(Debug, Clone)]
pub struct ItineraryPlanner<B = GoodLpBackend> {
    adapter: SolverAdapter<B>,
    config: SolverConfig,
}

impl ItineraryPlanner {
    /// Creates a planner over the `good_lp` backend.
    pub fn good_lp(config: SolverConfig) -> Self {
        Self::new(SolverAdapter::good_lp(), config)
    }
}

impl<B: MilpBackend> ItineraryPlanner<B> {
    /// Creates a planner over the given adapter.
    pub fn new(adapter: SolverAdapter<B>, config: SolverConfig) -> Self {
        Self { adapter, config }
    }

    /// Solver configuration used for every solve.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The underlying adapter.
    pub fn adapter(&self) -> &SolverAdapter<B> {
        &self.adapter
    }

    /// Solves one instance.
    ///
    /// # Errors
    ///
    /// Returns [`TripError::Validation`] for malformed data (no solver is
    /// invoked) and [`TripError::Solver`] if neither the preferred nor the
    /// default solver could be run. Infeasibility is reported through the
    /// solution status.
    pub fn solve(&self, data: &ItineraryData) -> Result<ItinerarySolution, TripError> {
        let model = build_model(data)?;
        let raw = self.adapter.solve(model.milp(), &self.config)?;
        let solution = assemble_solution(data, &model, &raw);
        debug!(
            status = %solution.status(),
            objective = ?solution.objective_value(),
            selected = solution.selected_indices().len(),
            "itinerary assembled"
        );
        Ok(solution)
    }
}

/// Solves one instance with the `good_lp` backend.
///
/// Shorthand for `ItineraryPlanner::good_lp(config.clone()).solve(data)`.
pub fn solve_itinerary(
    data: &ItineraryData,
    config: &SolverConfig,
) -> Result<ItinerarySolution, TripError> {
    ItineraryPlanner::good_lp(config.clone()).solve(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SolverInvocationError, ValidationError};
    use crate::milp::MilpModel;
    use crate::models::SolveStatus;
    use crate::solver::{RawResult, SolverKind};
    use crate::test_support::{line_instance, three_city_instance};

    const EPS: f64 = 1e-6;

    fn solve(data: &ItineraryData) -> ItinerarySolution {
        solve_itinerary(data, &SolverConfig::default()).expect("valid instance")
    }

    /// Flow balance, resource limits and tour shape of an optimal solution.
    fn assert_consistent(data: &ItineraryData, sol: &ItinerarySolution) {
        assert!(sol.is_optimal());
        let stays = sol.stay_days().expect("optimal");
        assert_eq!(stays[0], 0);
        assert!(sol.total_cost().expect("optimal") <= data.budget() + EPS);
        assert!(sol.total_time().expect("optimal") <= data.total_trip_days() + EPS);

        for i in 1..data.n_cities() {
            if sol.selected_indices().contains(&i) {
                assert!(stays[i] >= data.min_stay(i) && stays[i] <= data.max_stay(i));
            } else {
                assert_eq!(stays[i], 0);
            }
        }

        let route = sol.route_indices();
        assert_eq!(route[0], 0);
        if sol.selected_indices().is_empty() {
            return;
        }
        // Every selected city exactly once, nothing else: no subtours.
        assert!(sol.is_closed_tour());
        let mut visited = route[1..route.len() - 1].to_vec();
        visited.sort_unstable();
        assert_eq!(visited, sol.selected_indices());
    }

    #[test]
    fn test_time_budget_binds() {
        let data = three_city_instance(20.0);
        let sol = solve(&data);
        assert_eq!(sol.status(), SolveStatus::Optimal);
        assert_eq!(sol.selected_indices(), &[1, 2]);
        assert_eq!(sol.stay_days(), Some(&[0, 3, 2][..]));
        assert!((sol.objective_value().expect("optimal") - 46.0).abs() < EPS);
        assert!((sol.total_time().expect("optimal") - 20.0).abs() < EPS);
        assert_consistent(&data, &sol);
    }

    #[test]
    fn test_stay_caps_bind() {
        let data = three_city_instance(25.0);
        let sol = solve(&data);
        assert_eq!(sol.stay_days(), Some(&[0, 4, 4][..]));
        assert!((sol.objective_value().expect("optimal") - 72.0).abs() < EPS);
        assert!((sol.total_cost().expect("optimal") - 39.0).abs() < EPS);
        assert_eq!(sol.route_indices().len(), 4);
        assert_consistent(&data, &sol);
    }

    #[test]
    fn test_budget_too_small_is_infeasible() {
        let data = three_city_instance(20.0).with_budget(5.0);
        let sol = solve(&data);
        assert_eq!(sol.status(), SolveStatus::Infeasible);
        assert!(sol.objective_value().is_none());
        assert!(sol.selected_indices().is_empty());
        assert!(sol.route_indices().is_empty());
    }

    #[test]
    fn test_line_instance_no_subtours() {
        let data = line_instance();
        let sol = solve(&data);
        assert_consistent(&data, &sol);
        assert!(!sol.selected_indices().is_empty());
    }

    #[test]
    fn test_validation_error_before_solver() {
        let data = three_city_instance(0.0);
        let err = solve_itinerary(&data, &SolverConfig::default()).expect_err("invalid");
        assert!(matches!(
            err,
            TripError::Validation(ValidationError::NonPositive {
                what: "total_trip_days",
                ..
            })
        ));
    }

    struct Broken;

    impl MilpBackend for Broken {
        fn solve(
            &self,
            _model: &MilpModel,
            solver: Option<SolverKind>,
            _config: &SolverConfig,
        ) -> Result<RawResult, SolverInvocationError> {
            Err(SolverInvocationError::Rejected {
                solver: solver.unwrap_or(SolverKind::Microlp),
                message: "license expired".into(),
            })
        }
    }

    #[test]
    fn test_invocation_error_propagates() {
        let planner = ItineraryPlanner::new(SolverAdapter::new(Broken), SolverConfig::default());
        let err = planner.solve(&three_city_instance(20.0)).expect_err("broken");
        assert!(matches!(err, TripError::Solver(SolverInvocationError::Rejected { .. })));
    }

    /// Claims an inaccurate optimum with too few values.
    struct Truncated;

    impl MilpBackend for Truncated {
        fn solve(
            &self,
            _model: &MilpModel,
            solver: Option<SolverKind>,
            _config: &SolverConfig,
        ) -> Result<RawResult, SolverInvocationError> {
            Ok(RawResult {
                status: SolveStatus::OptimalInaccurate,
                values: Some(vec![1.0; 3]),
                objective: Some(1.0),
                solver: solver.unwrap_or(SolverKind::Microlp),
            })
        }
    }

    #[test]
    fn test_truncated_point_is_not_trusted() {
        let data = crate::instance::generate_synthetic(
            &crate::instance::SyntheticConfig::new(5).with_cities(4),
        )
        .expect("valid");
        let planner = ItineraryPlanner::new(SolverAdapter::new(Truncated), SolverConfig::default());
        let sol = planner.solve(&data).expect("status, not error");
        assert_eq!(sol.status(), SolveStatus::Other);
        assert!(sol.objective_value().is_none());
        assert!(sol.route_indices().is_empty());
    }

    #[test]
    fn test_public_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ItineraryData>();
        assert_send_sync::<ItinerarySolution>();
        assert_send_sync::<crate::planner::BudgetSweep>();
        assert_send_sync::<SolverAdapter<GoodLpBackend>>();
        assert_send_sync::<ItineraryPlanner<GoodLpBackend>>();
        assert_send_sync::<crate::formulation::ItineraryModel>();
    }

    #[test]
    fn test_preferred_cbc_falls_back() {
        let config = SolverConfig::default().with_preferred(SolverKind::CoinCbc);
        let sol = solve_itinerary(&three_city_instance(20.0), &config).expect("fallback");
        assert!(sol.is_optimal());
        assert!((sol.objective_value().expect("optimal") - 46.0).abs() < EPS);
    }
}
