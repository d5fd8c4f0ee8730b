//! Preferred-solver-first invocation with a single default fallback.

use tracing::{debug, info, warn};

use super::{GoodLpBackend, MilpBackend, RawResult, SolverConfig};
use crate::error::SolverInvocationError;
use crate::milp::MilpModel;
use crate::models::SolveStatus;

/// Relative violation above which an optimal point is reported inaccurate.
pub const STRICT_TOLERANCE: f64 = 1e-6;

/// Relative violation above which an optimal point is not trusted at all.
pub const LOOSE_TOLERANCE: f64 = 1e-3;

/// Runs models on a [`MilpBackend`].
///
/// The preferred solver is tried first. If it cannot be run (not compiled
/// in, or it fails without a verdict) the model is retried exactly once
/// with the backend's default solver; a second failure is returned to the
/// caller. Infeasible and unbounded verdicts are never retried.
///
/// Optimal points are checked against the model: a worst relative
/// violation above [`STRICT_TOLERANCE`] downgrades the status to
/// [`SolveStatus::OptimalInaccurate`], above [`LOOSE_TOLERANCE`] to
/// [`SolveStatus::Other`].
///
/// # Examples
///
/// ```
/// use u_itinerary::milp::{LinearExpr, MilpModel, Relation, VarDomain};
/// use u_itinerary::models::SolveStatus;
/// use u_itinerary::solver::{SolverAdapter, SolverConfig, SolverKind};
///
/// let mut model = MilpModel::new();
/// let x = model.add_variable("x", VarDomain::integer(0.0, Some(10.0)));
/// model.add_constraint("cap", LinearExpr::term(x, 2.0), Relation::Le, 7.0);
/// model.maximize(LinearExpr::term(x, 1.0));
///
/// // coin_cbc is not compiled in by default, so this falls back to microlp.
/// let config = SolverConfig::default().with_preferred(SolverKind::CoinCbc);
/// let raw = SolverAdapter::good_lp().solve(&model, &config).expect("solvable");
/// assert_eq!(raw.status, SolveStatus::Optimal);
/// assert!((raw.objective.unwrap() - 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverAdapter<B = GoodLpBackend> {
    backend: B,
}

impl SolverAdapter {
    /// Creates an adapter over [`GoodLpBackend`].
    pub fn good_lp() -> Self {
        Self::new(GoodLpBackend)
    }
}

impl<B: MilpBackend> SolverAdapter<B> {
    /// Creates an adapter over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Solves `model` following the fallback policy.
    pub fn solve(
        &self,
        model: &MilpModel,
        config: &SolverConfig,
    ) -> Result<RawResult, SolverInvocationError> {
        if config.verbose {
            info!(
                solver = %config.preferred,
                variables = model.num_variables(),
                integral = model.num_integral(),
                constraints = model.num_constraints(),
                "solving model"
            );
        }

        let raw = match self.backend.solve(model, Some(config.preferred), config) {
            Ok(raw) => raw,
            Err(err) => {
                match &err {
                    SolverInvocationError::Unavailable { .. } => {
                        warn!(error = %err, "preferred solver not installed, retrying with default")
                    }
                    SolverInvocationError::Rejected { .. } => {
                        warn!(error = %err, "preferred solver failed, retrying with default")
                    }
                }
                self.backend.solve(model, None, config)?
            }
        };

        let raw = check_point(model, raw);
        if config.verbose {
            info!(
                solver = %raw.solver,
                status = %raw.status,
                objective = ?raw.objective,
                "solve finished"
            );
        } else {
            debug!(solver = %raw.solver, status = %raw.status, "solve finished");
        }
        Ok(raw)
    }
}

/// Downgrades an optimal status whose point does not satisfy the model.
///
/// Applies to both optimal kinds; a point of the wrong length or with
/// non-finite entries is never trusted. An inaccurate verdict from the
/// backend is never upgraded.
fn check_point(model: &MilpModel, mut raw: RawResult) -> RawResult {
    if !raw.status.is_optimal() {
        return raw;
    }
    let Some(values) = raw.values.as_deref() else {
        warn!(status = %raw.status, "optimal status without a point");
        raw.status = SolveStatus::Other;
        return raw;
    };
    let violation = model.max_violation(values);
    if violation > LOOSE_TOLERANCE {
        warn!(
            violation,
            values = values.len(),
            variables = model.num_variables(),
            "solver point violates the model"
        );
        raw.status = SolveStatus::Other;
    } else if violation > STRICT_TOLERANCE {
        debug!(violation, "solver point is slightly off");
        raw.status = SolveStatus::OptimalInaccurate;
    }
    raw
}
