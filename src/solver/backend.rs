//! MILP backends.
//!
//! [`MilpBackend`] is the narrow interface the planner consumes: a
//! [`MilpModel`] in, a status plus raw variable values out.
//! [`GoodLpBackend`] implements it on top of `good_lp`.

use good_lp::{
    variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable,
};
use tracing::debug;

use super::{SolverConfig, SolverKind};
use crate::error::SolverInvocationError;
use crate::milp::{LinearExpr, MilpModel, ObjectiveSense, Relation, VarDomain};
use crate::models::SolveStatus;

/// Raw outcome of one solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResult {
    /// Terminal status.
    pub status: SolveStatus,
    /// One value per declared variable, if the solver produced a point.
    pub values: Option<Vec<f64>>,
    /// Model objective evaluated at `values`.
    pub objective: Option<f64>,
    /// Backend that produced this result.
    pub solver: SolverKind,
}

impl RawResult {
    /// A solved result; the objective is evaluated from `model`.
    pub fn solved(solver: SolverKind, model: &MilpModel, values: Vec<f64>) -> Self {
        let objective = model.objective().eval(&values);
        Self {
            status: SolveStatus::Optimal,
            values: Some(values),
            objective: Some(objective),
            solver,
        }
    }

    /// A result without a solution point.
    pub fn without_solution(solver: SolverKind, status: SolveStatus) -> Self {
        Self {
            status,
            values: None,
            objective: None,
            solver,
        }
    }
}

/// A MILP solver the planner can invoke.
///
/// `solver = None` asks for the backend's default solver. Mathematical
/// verdicts (infeasible, unbounded) are `Ok` results; `Err` means the
/// solver could not be run at all.
pub trait MilpBackend {
    /// Solves `model` with the given solver.
    fn solve(
        &self,
        model: &MilpModel,
        solver: Option<SolverKind>,
        config: &SolverConfig,
    ) -> Result<RawResult, SolverInvocationError>;
}

/// Backend built on `good_lp`.
///
/// `microlp` is always available; `coin_cbc` needs the cargo feature of the
/// same name and receives [`SolverOptions`](super::SolverOptions) as CBC
/// parameters. `microlp` takes no parameters, so options are ignored there.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpBackend;

impl MilpBackend for GoodLpBackend {
    fn solve(
        &self,
        model: &MilpModel,
        solver: Option<SolverKind>,
        config: &SolverConfig,
    ) -> Result<RawResult, SolverInvocationError> {
        match solver.unwrap_or_else(SolverKind::library_default) {
            SolverKind::Microlp => solve_microlp(model, config),
            SolverKind::CoinCbc => solve_coin_cbc(model, config),
        }
    }
}

/// A model translated into `good_lp` terms.
struct Translated {
    variables: ProblemVariables,
    handles: Vec<Variable>,
    objective: Expression,
    rows: Vec<good_lp::Constraint>,
}

impl Translated {
    fn new(model: &MilpModel) -> Self {
        let mut variables = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .variables()
            .iter()
            .map(|def| {
                let v = match def.domain {
                    VarDomain::Binary => variable().binary(),
                    VarDomain::Integer { lower, upper } => {
                        let v = variable().integer().min(lower);
                        match upper {
                            Some(upper) => v.max(upper),
                            None => v,
                        }
                    }
                    VarDomain::Continuous { lower, upper } => {
                        let v = variable().min(lower);
                        match upper {
                            Some(upper) => v.max(upper),
                            None => v,
                        }
                    }
                };
                variables.add(v.name(def.name.clone()))
            })
            .collect();

        let objective = expression(model.objective(), &handles);
        let rows = model
            .constraints()
            .iter()
            .map(|c| {
                let lhs = expression(&c.expr, &handles);
                match c.relation {
                    Relation::Le => lhs.leq(c.rhs),
                    Relation::Eq => lhs.eq(c.rhs),
                    Relation::Ge => lhs.geq(c.rhs),
                }
            })
            .collect();

        Self {
            variables,
            handles,
            objective,
            rows,
        }
    }
}

fn expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut e = Expression::from(expr.constant_value());
    for &(v, coef) in expr.terms() {
        e.add_mul(coef, handles[v.index()]);
    }
    e
}

/// Adds the rows, solves, and maps `good_lp` outcomes onto [`RawResult`].
fn run<M>(
    mut problem: M,
    rows: Vec<good_lp::Constraint>,
    handles: &[Variable],
    model: &MilpModel,
    kind: SolverKind,
) -> Result<RawResult, SolverInvocationError>
where
    M: SolverModel<Error = ResolutionError>,
{
    for row in rows {
        problem = problem.with(row);
    }
    match problem.solve() {
        Ok(solution) => {
            let values = handles.iter().map(|&v| solution.value(v)).collect();
            Ok(RawResult::solved(kind, model, values))
        }
        Err(ResolutionError::Infeasible) => {
            Ok(RawResult::without_solution(kind, SolveStatus::Infeasible))
        }
        Err(ResolutionError::Unbounded) => {
            Ok(RawResult::without_solution(kind, SolveStatus::Unbounded))
        }
        Err(other) => Err(SolverInvocationError::Rejected {
            solver: kind,
            message: other.to_string(),
        }),
    }
}

fn solve_microlp(
    model: &MilpModel,
    config: &SolverConfig,
) -> Result<RawResult, SolverInvocationError> {
    if !config.options.is_empty() {
        debug!(
            ignored = config.options.len(),
            "microlp takes no parameters; options ignored"
        );
    }
    let t = Translated::new(model);
    let problem = match model.sense() {
        ObjectiveSense::Maximize => t.variables.maximise(t.objective),
        ObjectiveSense::Minimize => t.variables.minimise(t.objective),
    }
    .using(good_lp::solvers::microlp::microlp);
    run(problem, t.rows, &t.handles, model, SolverKind::Microlp)
}

#[cfg(feature = "coin_cbc")]
fn solve_coin_cbc(
    model: &MilpModel,
    config: &SolverConfig,
) -> Result<RawResult, SolverInvocationError> {
    let t = Translated::new(model);
    let mut problem = match model.sense() {
        ObjectiveSense::Maximize => t.variables.maximise(t.objective),
        ObjectiveSense::Minimize => t.variables.minimise(t.objective),
    }
    .using(good_lp::solvers::coin_cbc::coin_cbc);
    problem.set_parameter("log", if config.verbose { "1" } else { "0" });
    for (key, value) in config.options.iter() {
        problem.set_parameter(key, value);
    }
    run(problem, t.rows, &t.handles, model, SolverKind::CoinCbc)
}

#[cfg(not(feature = "coin_cbc"))]
fn solve_coin_cbc(
    _model: &MilpModel,
    _config: &SolverConfig,
) -> Result<RawResult, SolverInvocationError> {
    Err(SolverInvocationError::Unavailable {
        solver: SolverKind::CoinCbc,
    })
}
