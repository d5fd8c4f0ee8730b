//! Turns raw solver output into an [`ItinerarySolution`].

use super::{reconstruct_route, ArcMatrix};
use crate::formulation::ItineraryModel;
use crate::models::{ItineraryData, ItinerarySolution, SolveStatus};
use crate::solver::RawResult;

/// Assembles the solution of one solve.
///
/// Non-optimal results yield a solution that carries only the status. An
/// optimal status without a point covering every model variable is
/// reported as [`SolveStatus::Other`] with no solution. Otherwise selection and arc values are rounded
/// to {0, 1} and stays to whole days before anything is derived from them,
/// so breakdowns use exactly the terms of the model's budget rows:
///
/// - `travel_cost = Σ travel_cost·arc`
/// - `stay_cost = Σ stay_cost_per_day·stay`
/// - `total_cost = stay_cost + travel_cost`
/// - `total_time = Σ stay + Σ travel_time·arc`
///
/// The objective is the value reported for the raw solver point.
pub fn assemble_solution(
    data: &ItineraryData,
    model: &ItineraryModel,
    raw: &RawResult,
) -> ItinerarySolution {
    let values = match (&raw.values, raw.status.is_optimal()) {
        (Some(values), true) if values.len() == model.milp().num_variables() => values,
        (_, true) => return ItinerarySolution::without_solution(SolveStatus::Other),
        _ => return ItinerarySolution::without_solution(raw.status),
    };
    let n = model.n_cities();

    let select: Vec<bool> = model
        .select_values(values)
        .into_iter()
        .map(|v| v.round() > 0.5)
        .collect();
    let rounded_arcs: Vec<f64> = model
        .arc_values(values)
        .into_iter()
        .map(|v| v.round().clamp(0.0, 1.0))
        .collect();
    let arcs = ArcMatrix::from_values(n, &rounded_arcs);
    let stays: Vec<u32> = model
        .stay_values(values)
        .into_iter()
        .enumerate()
        .map(|(i, v)| if i == 0 { 0 } else { v.round().max(0.0) as u32 })
        .collect();

    let selected_indices: Vec<usize> = (1..n).filter(|&i| select[i]).collect();
    let route_indices = reconstruct_route(&arcs);

    let mut travel_time = 0.0;
    let mut travel_cost = 0.0;
    for (from, to) in arcs.arcs() {
        if from == to {
            continue;
        }
        travel_time += data.travel_time(from, to);
        travel_cost += data.travel_cost(from, to);
    }
    let stay_days: f64 = stays.iter().map(|&d| f64::from(d)).sum();
    let stay_cost: f64 = stays
        .iter()
        .enumerate()
        .map(|(i, &d)| data.stay_cost_per_day(i) * f64::from(d))
        .sum();

    ItinerarySolution {
        status: raw.status,
        objective_value: raw.objective,
        selected_indices,
        route_indices,
        stay_days: Some(stays),
        total_time: Some(stay_days + travel_time),
        total_cost: Some(stay_cost + travel_cost),
        stay_cost: Some(stay_cost),
        travel_cost: Some(travel_cost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::build_model;
    use crate::solver::SolverKind;
    use crate::test_support::three_city_instance;

    fn raw_point(model: &ItineraryModel, noise: f64) -> RawResult {
        let mut values = vec![0.0; model.milp().num_variables()];
        for i in 0..3 {
            values[model.select(i).index()] = 1.0 - noise;
        }
        for (from, to) in [(0, 2), (2, 1), (1, 0)] {
            values[model.arc(from, to).index()] = 1.0 - noise;
        }
        values[model.arc(1, 2).index()] = noise;
        values[model.stay(1).index()] = 3.0 + noise;
        values[model.stay(2).index()] = 2.0 - noise;
        values[model.stay(0).index()] = -noise;
        values[model.order(2).index()] = 1.0;
        values[model.order(1).index()] = 2.0;
        RawResult::solved(SolverKind::Microlp, model.milp(), values)
    }

    #[test]
    fn test_assemble_exact_point() {
        let data = three_city_instance(20.0);
        let model = build_model(&data).expect("valid");
        let sol = assemble_solution(&data, &model, &raw_point(&model, 0.0));
        assert_eq!(sol.status(), SolveStatus::Optimal);
        assert_eq!(sol.objective_value(), Some(46.0));
        assert_eq!(sol.selected_indices(), &[1, 2]);
        assert_eq!(sol.route_indices(), &[0, 2, 1, 0]);
        assert_eq!(sol.stay_days(), Some(&[0, 3, 2][..]));
        assert_eq!(sol.travel_cost(), Some(15.0));
        assert_eq!(sol.stay_cost(), Some(15.0));
        assert_eq!(sol.total_cost(), Some(30.0));
        assert_eq!(sol.total_time(), Some(20.0));
    }

    #[test]
    fn test_assemble_rounds_noise() {
        let data = three_city_instance(20.0);
        let model = build_model(&data).expect("valid");
        let sol = assemble_solution(&data, &model, &raw_point(&model, 3e-9));
        assert_eq!(sol.selected_indices(), &[1, 2]);
        assert_eq!(sol.route_indices(), &[0, 2, 1, 0]);
        assert_eq!(sol.stay_days(), Some(&[0, 3, 2][..]));
        // Totals use rounded values, so they match the budget rows exactly.
        assert_eq!(sol.total_time(), Some(20.0));
        assert_eq!(sol.total_cost(), Some(30.0));
    }

    #[test]
    fn test_non_optimal_is_empty() {
        let data = three_city_instance(20.0);
        let model = build_model(&data).expect("valid");
        for status in [
            SolveStatus::Infeasible,
            SolveStatus::Unbounded,
            SolveStatus::SolverError,
            SolveStatus::Other,
        ] {
            let mut raw = raw_point(&model, 0.0);
            raw.status = status;
            let sol = assemble_solution(&data, &model, &raw);
            assert_eq!(sol.status(), status);
            assert!(sol.objective_value().is_none());
            assert!(sol.selected_indices().is_empty());
            assert!(sol.route_indices().is_empty());
            assert!(sol.stay_days().is_none());
            assert!(sol.total_time().is_none());
        }
    }

    #[test]
    fn test_inaccurate_is_still_assembled() {
        let data = three_city_instance(20.0);
        let model = build_model(&data).expect("valid");
        let mut raw = raw_point(&model, 1e-5);
        raw.status = SolveStatus::OptimalInaccurate;
        let sol = assemble_solution(&data, &model, &raw);
        assert!(sol.is_optimal());
        assert!(sol.is_closed_tour());
    }

    #[test]
    fn test_short_point_is_not_assembled() {
        let data = three_city_instance(20.0);
        let model = build_model(&data).expect("valid");
        for status in [SolveStatus::Optimal, SolveStatus::OptimalInaccurate] {
            let raw = RawResult {
                status,
                values: Some(vec![1.0; 3]),
                objective: Some(1.0),
                solver: SolverKind::Microlp,
            };
            let sol = assemble_solution(&data, &model, &raw);
            assert_eq!(sol.status(), SolveStatus::Other);
            assert!(sol.objective_value().is_none());
            assert!(sol.stay_days().is_none());
            assert!(sol.route_indices().is_empty());
        }
    }

    #[test]
    fn test_degenerate_arcs_truncate_route() {
        let data = three_city_instance(20.0);
        let model = build_model(&data).expect("valid");
        let mut raw = raw_point(&model, 0.0);
        if let Some(values) = raw.values.as_mut() {
            // Two departures from city 2.
            values[model.arc(2, 0).index()] = 1.0;
            values[model.arc(2, 1).index()] = 1.0;
        }
        let sol = assemble_solution(&data, &model, &raw);
        assert_eq!(sol.route_indices(), &[0, 2]);
        assert!(!sol.is_closed_tour());
    }
}
