//! Solver-independent mixed-integer linear model.

use serde::{Deserialize, Serialize};

use super::{LinearExpr, VarId};

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VarDomain {
    /// 0 or 1.
    Binary,
    /// Integer within `[lower, upper]` (`upper = None` means unbounded).
    Integer {
        /// Lower bound.
        lower: f64,
        /// Upper bound, if any.
        upper: Option<f64>,
    },
    /// Real within `[lower, upper]` (`upper = None` means unbounded).
    Continuous {
        /// Lower bound.
        lower: f64,
        /// Upper bound, if any.
        upper: Option<f64>,
    },
}

impl VarDomain {
    /// Integer domain.
    pub fn integer(lower: f64, upper: Option<f64>) -> Self {
        Self::Integer { lower, upper }
    }

    /// Continuous domain.
    pub fn continuous(lower: f64, upper: Option<f64>) -> Self {
        Self::Continuous { lower, upper }
    }

    /// Returns `true` for binary and integer domains.
    pub fn is_integral(&self) -> bool {
        !matches!(self, Self::Continuous { .. })
    }

    /// `(lower, upper)` bounds.
    pub fn bounds(&self) -> (f64, Option<f64>) {
        match *self {
            Self::Binary => (0.0, Some(1.0)),
            Self::Integer { lower, upper } | Self::Continuous { lower, upper } => (lower, upper),
        }
    }

    /// How far `value` lies outside this domain (0 when inside).
    pub fn violation(&self, value: f64) -> f64 {
        let (lower, upper) = self.bounds();
        let mut worst = (lower - value).max(0.0);
        if let Some(upper) = upper {
            worst = worst.max(value - upper);
        }
        if self.is_integral() {
            worst = worst.max((value - value.round()).abs());
        }
        worst
    }
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDef {
    /// Human-readable name, e.g. `arc_0_2`.
    pub name: String,
    /// Domain.
    pub domain: VarDomain,
}

/// Comparison operator of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    /// `expr <= rhs`
    Le,
    /// `expr == rhs`
    Eq,
    /// `expr >= rhs`
    Ge,
}

/// A named linear constraint `expr (<=|==|>=) rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Name for diagnostics.
    pub name: String,
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Operator.
    pub relation: Relation,
    /// Right-hand side.
    pub rhs: f64,
}

impl Constraint {
    /// Absolute amount by which `values` violate this constraint.
    pub fn violation(&self, values: &[f64]) -> f64 {
        let lhs = self.expr.eval(values);
        match self.relation {
            Relation::Le => (lhs - self.rhs).max(0.0),
            Relation::Ge => (self.rhs - lhs).max(0.0),
            Relation::Eq => (lhs - self.rhs).abs(),
        }
    }

    /// Violation scaled by the magnitude of the row.
    pub fn relative_violation(&self, values: &[f64]) -> f64 {
        let scale = 1.0 + self.rhs.abs().max(self.expr.max_abs_coef());
        self.violation(values) / scale
    }

    /// Returns `true` if `values` satisfy the constraint within `tol`.
    pub fn is_satisfied(&self, values: &[f64], tol: f64) -> bool {
        self.violation(values) <= tol
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveSense {
    /// Maximize the objective.
    Maximize,
    /// Minimize the objective.
    Minimize,
}

/// A mixed-integer linear program independent of any solver library.
///
/// Backends translate it into their own representation at solve time, so a
/// model can be handed to several solvers without being rebuilt.
///
/// # Examples
///
/// ```
/// use u_itinerary::milp::{LinearExpr, MilpModel, Relation, VarDomain};
///
/// let mut model = MilpModel::new();
/// let x = model.add_variable("x", VarDomain::Binary);
/// let y = model.add_variable("y", VarDomain::integer(0.0, None));
/// model.add_constraint("cap", LinearExpr::sum([x, y]), Relation::Le, 3.0);
/// model.maximize(LinearExpr::term(y, 2.0));
///
/// assert_eq!(model.num_variables(), 2);
/// assert_eq!(model.num_constraints(), 1);
/// assert_eq!(model.max_violation(&[1.0, 2.0]), 0.0);
/// assert!(model.max_violation(&[1.0, 4.0]) > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilpModel {
    variables: Vec<VariableDef>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
    sense: ObjectiveSense,
}

impl MilpModel {
    /// Creates an empty model minimizing zero.
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: LinearExpr::new(),
            sense: ObjectiveSense::Minimize,
        }
    }

    /// Declares a variable.
    pub fn add_variable(&mut self, name: impl Into<String>, domain: VarDomain) -> VarId {
        self.variables.push(VariableDef {
            name: name.into(),
            domain,
        });
        VarId(self.variables.len() - 1)
    }

    /// Adds a constraint.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name: name.into(),
            expr,
            relation,
            rhs,
        });
    }

    /// Sets a maximization objective.
    pub fn maximize(&mut self, objective: LinearExpr) {
        self.objective = objective;
        self.sense = ObjectiveSense::Maximize;
    }

    /// Sets a minimization objective.
    pub fn minimize(&mut self, objective: LinearExpr) {
        self.objective = objective;
        self.sense = ObjectiveSense::Minimize;
    }

    /// Declared variables in index order.
    pub fn variables(&self) -> &[VariableDef] {
        &self.variables
    }

    /// Returns the variable with the given id.
    pub fn variable(&self, id: VarId) -> &VariableDef {
        &self.variables[id.0]
    }

    /// All constraints in insertion order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Looks up a constraint by name.
    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Objective expression.
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Optimization direction.
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    /// Number of declared variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Number of binary or integer variables.
    pub fn num_integral(&self) -> usize {
        self.variables
            .iter()
            .filter(|v| v.domain.is_integral())
            .count()
    }

    /// Worst relative violation of any constraint, bound or integrality
    /// requirement at `values`.
    ///
    /// Returns `f64::INFINITY` if `values` does not cover every variable or
    /// holds a non-finite entry.
    pub fn max_violation(&self, values: &[f64]) -> f64 {
        if values.len() != self.variables.len() || values.iter().any(|v| !v.is_finite()) {
            return f64::INFINITY;
        }
        let domains = self
            .variables
            .iter()
            .zip(values)
            .map(|(def, &v)| def.domain.violation(v) / (1.0 + v.abs()));
        let rows = self
            .constraints
            .iter()
            .map(|c| c.relative_violation(values));
        domains.chain(rows).fold(0.0, f64::max)
    }
}

impl Default for MilpModel {
    fn default() -> Self {
        Self::new()
    }
}
