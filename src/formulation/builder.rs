//! Itinerary MILP builder.
//!
//! Encodes city selection, routing arcs, integer stay days and
//! Miller–Tucker–Zemlin ordering variables for one closed tour through
//! home (city 0).
//!
//! # Reference
//!
//! Miller, Tucker & Zemlin (1960), "Integer programming formulation of
//! traveling salesman problems". The MTZ rows need only O(n²) constraints,
//! which keeps the model small for the city counts this crate targets.

use tracing::debug;

use crate::error::ValidationError;
use crate::milp::{LinearExpr, MilpModel, Relation, VarDomain, VarId};
use crate::models::ItineraryData;

/// An itinerary MILP together with handles to its decision variables.
///
/// | handle      | domain                    | meaning                       |
/// |-------------|---------------------------|-------------------------------|
/// | `select[i]` | binary                    | city `i` is visited           |
/// | `arc[i][j]` | binary                    | tour goes directly `i → j`    |
/// | `stay[i]`   | integer `0..=max_stay[i]` | days spent in city `i`        |
/// | `order[i]`  | continuous `0..=n-1`      | MTZ position of city `i`      |
#[derive(Debug, Clone)]
pub struct ItineraryModel {
    milp: MilpModel,
    n: usize,
    select: Vec<VarId>,
    arc: Vec<VarId>,
    stay: Vec<VarId>,
    order: Vec<VarId>,
}

impl ItineraryModel {
    /// The underlying solver-independent model.
    pub fn milp(&self) -> &MilpModel {
        &self.milp
    }

    /// Number of cities including home.
    pub fn n_cities(&self) -> usize {
        self.n
    }

    /// Selection variable of city `i`.
    pub fn select(&self, i: usize) -> VarId {
        self.select[i]
    }

    /// Arc variable `from → to`.
    pub fn arc(&self, from: usize, to: usize) -> VarId {
        self.arc[from * self.n + to]
    }

    /// Stay variable of city `i`.
    pub fn stay(&self, i: usize) -> VarId {
        self.stay[i]
    }

    /// MTZ ordering variable of city `i`.
    pub fn order(&self, i: usize) -> VarId {
        self.order[i]
    }

    /// Values of the selection variables, in city order.
    pub fn select_values(&self, values: &[f64]) -> Vec<f64> {
        self.select.iter().map(|v| values[v.index()]).collect()
    }

    /// Values of the arc variables, row-major.
    pub fn arc_values(&self, values: &[f64]) -> Vec<f64> {
        self.arc.iter().map(|v| values[v.index()]).collect()
    }

    /// Values of the stay variables, in city order.
    pub fn stay_values(&self, values: &[f64]) -> Vec<f64> {
        self.stay.iter().map(|v| values[v.index()]).collect()
    }
}

/// Builds the itinerary MILP.
///
/// Validates `data` first; nothing is built for malformed input.
///
/// # Constraints
///
/// 1. `select[0] = 1`, `stay[0] = 0`
/// 2. `arc[i][i] = 0`
/// 3. `Σ_j arc[k][j] = Σ_j arc[j][k] = select[k]` for `k ≥ 1`
/// 4. `Σ_j arc[0][j] = Σ_j arc[j][0] = 1`
/// 5. `min_stay[i]·select[i] ≤ stay[i] ≤ max_stay[i]·select[i]` for `i ≥ 1`
/// 6. `Σ stay + Σ travel_time·arc ≤ total_trip_days`
/// 7. `Σ stay_cost·stay + Σ travel_cost·arc ≤ budget`
/// 8. `order[0] = 0`, `1 ≤ order[i] ≤ n-1`,
///    `order[i] − order[j] + (n−1)·arc[i][j] ≤ n−2` for `i ≠ j ≥ 1`
///
/// Objective (maximize): `Σ enjoyment·stay − penalty·Σ travel_time·arc`.
///
/// # Examples
///
/// ```
/// use u_itinerary::models::{City, ItineraryData};
/// use u_itinerary::distance::CostMatrix;
/// use u_itinerary::formulation::build_model;
///
/// let data = ItineraryData::new(
///     vec![City::home("Home"), City::new("A", 3.0, 10.0, 2, 4)],
///     CostMatrix::uniform(2, 5.0),
///     CostMatrix::uniform(2, 5.0),
///     60.0,
///     20.0,
/// );
/// let model = build_model(&data).expect("valid data");
/// // select + arc + stay + order
/// assert_eq!(model.milp().num_variables(), 2 + 4 + 2 + 2);
/// assert!(model.milp().constraint("budget").is_some());
/// ```
pub fn build_model(data: &ItineraryData) -> Result<ItineraryModel, ValidationError> {
    data.validate()?;

    let n = data.n_cities();
    let mut milp = MilpModel::new();

    let select: Vec<VarId> = (0..n)
        .map(|i| milp.add_variable(format!("select_{i}"), VarDomain::Binary))
        .collect();
    let mut arc = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            arc.push(milp.add_variable(format!("arc_{i}_{j}"), VarDomain::Binary));
        }
    }
    let stay: Vec<VarId> = (0..n)
        .map(|i| {
            let upper = f64::from(data.max_stay(i));
            milp.add_variable(format!("stay_{i}"), VarDomain::integer(0.0, Some(upper)))
        })
        .collect();
    let last = (n - 1) as f64;
    let order: Vec<VarId> = (0..n)
        .map(|i| {
            milp.add_variable(
                format!("order_{i}"),
                VarDomain::continuous(0.0, Some(last)),
            )
        })
        .collect();
    let arc_at = |i: usize, j: usize| arc[i * n + j];

    // 1. Home is always part of the trip but never a stay.
    milp.add_constraint(
        "home_selected",
        LinearExpr::term(select[0], 1.0),
        Relation::Eq,
        1.0,
    );
    milp.add_constraint("home_stay", LinearExpr::term(stay[0], 1.0), Relation::Eq, 0.0);

    // 2. No self-loops.
    for i in 0..n {
        milp.add_constraint(
            format!("no_self_arc_{i}"),
            LinearExpr::term(arc_at(i, i), 1.0),
            Relation::Eq,
            0.0,
        );
    }

    // 3. Flow balance: in-degree = out-degree = select.
    for k in 1..n {
        let selected = LinearExpr::term(select[k], 1.0);
        let out = LinearExpr::sum((0..n).map(|j| arc_at(k, j))).minus(&selected);
        milp.add_constraint(format!("flow_out_{k}"), out, Relation::Eq, 0.0);
        let inc = LinearExpr::sum((0..n).map(|j| arc_at(j, k))).minus(&selected);
        milp.add_constraint(format!("flow_in_{k}"), inc, Relation::Eq, 0.0);
    }

    // 4. Exactly one departure from and one return to home.
    milp.add_constraint(
        "home_out",
        LinearExpr::sum((0..n).map(|j| arc_at(0, j))),
        Relation::Eq,
        1.0,
    );
    milp.add_constraint(
        "home_in",
        LinearExpr::sum((0..n).map(|j| arc_at(j, 0))),
        Relation::Eq,
        1.0,
    );

    // 5. Stay bounds, active only when selected.
    for i in 1..n {
        let mut lower = LinearExpr::term(stay[i], 1.0);
        lower.add_term(select[i], -f64::from(data.min_stay(i)));
        milp.add_constraint(format!("stay_min_{i}"), lower, Relation::Ge, 0.0);

        let mut upper = LinearExpr::term(stay[i], 1.0);
        upper.add_term(select[i], -f64::from(data.max_stay(i)));
        milp.add_constraint(format!("stay_max_{i}"), upper, Relation::Le, 0.0);
    }

    let mut travel_time = LinearExpr::new();
    let mut travel_cost = LinearExpr::new();
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            travel_time.add_term(arc_at(i, j), data.travel_time(i, j));
            travel_cost.add_term(arc_at(i, j), data.travel_cost(i, j));
        }
    }
    let mut stay_cost = LinearExpr::new();
    let mut enjoyment = LinearExpr::new();
    for (i, &s) in stay.iter().enumerate() {
        stay_cost.add_term(s, data.stay_cost_per_day(i));
        enjoyment.add_term(s, data.enjoyment_per_day(i));
    }

    // 6. Time budget.
    let total_time = LinearExpr::sum(stay.iter().copied()).plus(&travel_time);
    milp.add_constraint("trip_days", total_time, Relation::Le, data.total_trip_days());

    // 7. Cost budget.
    let total_cost = stay_cost.plus(&travel_cost);
    milp.add_constraint("budget", total_cost, Relation::Le, data.budget());

    // 8. MTZ subtour elimination over the non-home cities.
    milp.add_constraint(
        "order_home",
        LinearExpr::term(order[0], 1.0),
        Relation::Eq,
        0.0,
    );
    for i in 1..n {
        milp.add_constraint(
            format!("order_min_{i}"),
            LinearExpr::term(order[i], 1.0),
            Relation::Ge,
            1.0,
        );
        milp.add_constraint(
            format!("order_max_{i}"),
            LinearExpr::term(order[i], 1.0),
            Relation::Le,
            last,
        );
    }
    for i in 1..n {
        for j in 1..n {
            if i == j {
                continue;
            }
            let mut row = LinearExpr::term(order[i], 1.0);
            row.add_term(order[j], -1.0);
            row.add_term(arc_at(i, j), last);
            milp.add_constraint(format!("mtz_{i}_{j}"), row, Relation::Le, last - 1.0);
        }
    }

    let mut objective = enjoyment;
    objective.add_scaled(&travel_time, -data.travel_time_penalty());
    milp.maximize(objective);

    debug!(
        cities = n,
        variables = milp.num_variables(),
        constraints = milp.num_constraints(),
        "built itinerary model"
    );

    Ok(ItineraryModel {
        milp,
        n,
        select,
        arc,
        stay,
        order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::ObjectiveSense;
    use crate::models::City;
    use crate::test_support::{line_instance, three_city_instance};

    /// Values for the tour 0 → 1 → 2 → 0 with stays (3, 2).
    fn tour_values(model: &ItineraryModel) -> Vec<f64> {
        let mut values = vec![0.0; model.milp().num_variables()];
        for i in 0..3 {
            values[model.select(i).index()] = 1.0;
        }
        for (from, to) in [(0, 1), (1, 2), (2, 0)] {
            values[model.arc(from, to).index()] = 1.0;
        }
        values[model.stay(1).index()] = 3.0;
        values[model.stay(2).index()] = 2.0;
        values[model.order(1).index()] = 1.0;
        values[model.order(2).index()] = 2.0;
        values
    }

    #[test]
    fn test_sizes() {
        let model = build_model(&three_city_instance(20.0)).expect("valid");
        let n = 3;
        assert_eq!(model.n_cities(), n);
        assert_eq!(model.milp().num_variables(), 3 * n + n * n);
        assert_eq!(model.milp().num_integral(), 2 * n + n * n);
        // home 2, self 3, flow 4, home degree 2, stay 4, budgets 2,
        // order 1 + 4, mtz 2
        assert_eq!(model.milp().num_constraints(), 24);
        assert_eq!(model.milp().sense(), ObjectiveSense::Maximize);
    }

    #[test]
    fn test_handles_are_distinct() {
        let model = build_model(&line_instance()).expect("valid");
        let n = model.n_cities();
        let mut ids: Vec<usize> = (0..n)
            .flat_map(|i| {
                let mut v = vec![
                    model.select(i).index(),
                    model.stay(i).index(),
                    model.order(i).index(),
                ];
                v.extend((0..n).map(|j| model.arc(i, j).index()));
                v
            })
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), model.milp().num_variables());
        assert_eq!(model.milp().variable(model.arc(1, 3)).name, "arc_1_3");
    }

    #[test]
    fn test_feasible_tour_satisfies_model() {
        let model = build_model(&three_city_instance(20.0)).expect("valid");
        let values = tour_values(&model);
        assert!(model.milp().max_violation(&values) < 1e-12);
        // 10·3 + 8·2
        assert_eq!(model.milp().objective().eval(&values), 46.0);
    }

    #[test]
    fn test_time_budget_rejects_long_stays() {
        let model = build_model(&three_city_instance(20.0)).expect("valid");
        let mut values = tour_values(&model);
        values[model.stay(2).index()] = 4.0;
        let row = model.milp().constraint("trip_days").expect("present");
        // 7 stay days + 15 travel > 20
        assert!(!row.is_satisfied(&values, 1e-9));
        assert_eq!(row.violation(&values), 2.0);
    }

    #[test]
    fn test_budget_row_terms() {
        let data = three_city_instance(20.0).with_budget(5.0);
        let model = build_model(&data).expect("valid");
        let values = tour_values(&model);
        let row = model.milp().constraint("budget").expect("present");
        // 3·5 stay cost + 15 travel cost
        assert_eq!(row.expr.eval(&values), 30.0);
        assert_eq!(row.rhs, 5.0);
    }

    #[test]
    fn test_subtour_is_cut_by_mtz() {
        let model = build_model(&line_instance()).expect("valid");
        let mut values = vec![0.0; model.milp().num_variables()];
        values[model.select(0).index()] = 1.0;
        for i in 1..=4 {
            values[model.select(i).index()] = 1.0;
        }
        // Home loop 0 → 1 → 2 → 0 and a detached loop 3 ⇄ 4.
        for (from, to) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 3)] {
            values[model.arc(from, to).index()] = 1.0;
        }
        for i in 1..=4 {
            values[model.stay(i).index()] = 2.0;
        }
        // Flow balance holds for the pair of cycles...
        for k in 1..=4 {
            for name in [format!("flow_out_{k}"), format!("flow_in_{k}")] {
                let row = model.milp().constraint(&name).expect("present");
                assert!(row.is_satisfied(&values, 1e-9));
            }
        }
        // ...but no ordering makes both MTZ rows of 3 ⇄ 4 hold.
        for (u3, u4) in [(1.0, 1.0), (1.0, 4.0), (4.0, 1.0), (2.5, 3.5)] {
            values[model.order(3).index()] = u3;
            values[model.order(4).index()] = u4;
            let a = model.milp().constraint("mtz_3_4").expect("present");
            let b = model.milp().constraint("mtz_4_3").expect("present");
            assert!(!(a.is_satisfied(&values, 1e-9) && b.is_satisfied(&values, 1e-9)));
        }
    }

    #[test]
    fn test_penalty_in_objective() {
        let data = three_city_instance(20.0).with_travel_time_penalty(2.0);
        let model = build_model(&data).expect("valid");
        let values = tour_values(&model);
        assert_eq!(model.milp().objective().eval(&values), 46.0 - 2.0 * 15.0);
    }

    #[test]
    fn test_home_bounds_ignored() {
        let mut cities = three_city_instance(20.0).cities().to_vec();
        cities[0] = City::new("Home", 50.0, 50.0, 3, 9);
        let data = ItineraryData::new(
            cities,
            crate::distance::CostMatrix::uniform(3, 5.0),
            crate::distance::CostMatrix::uniform(3, 5.0),
            60.0,
            20.0,
        );
        let model = build_model(&data).expect("valid");
        assert_eq!(
            model.milp().variable(model.stay(0)).domain,
            VarDomain::integer(0.0, Some(0.0))
        );
        let values = tour_values(&model);
        assert_eq!(model.milp().objective().eval(&values), 46.0);
    }

    #[test]
    fn test_invalid_data_builds_nothing() {
        let data = three_city_instance(20.0).with_budget(-1.0);
        assert!(matches!(
            build_model(&data),
            Err(ValidationError::NonPositive { what: "budget", .. })
        ));
    }
}
