//! Linear expressions over model variables.

use serde::{Deserialize, Serialize};

/// Index of a variable in a [`MilpModel`](super::MilpModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position of the variable in the model's declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A linear expression `Σ coef·var + constant`.
///
/// Terms are kept in insertion order and may repeat a variable; evaluation
/// sums them.
///
/// # Examples
///
/// ```
/// use u_itinerary::milp::{LinearExpr, MilpModel, VarDomain};
///
/// let mut model = MilpModel::new();
/// let x = model.add_variable("x", VarDomain::Binary);
/// let y = model.add_variable("y", VarDomain::integer(0.0, Some(5.0)));
///
/// let mut e = LinearExpr::constant(1.0);
/// e.add_term(x, 2.0);
/// e.add_term(y, -1.0);
/// assert_eq!(e.eval(&[1.0, 3.0]), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    /// Creates the zero expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a constant expression.
    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// Creates `coef·var`.
    pub fn term(var: VarId, coef: f64) -> Self {
        Self {
            terms: vec![(var, coef)],
            constant: 0.0,
        }
    }

    /// Creates `Σ var` over the given variables.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1.0)).collect(),
            constant: 0.0,
        }
    }

    /// Adds `coef·var`. Zero coefficients are dropped.
    pub fn add_term(&mut self, var: VarId, coef: f64) {
        if coef != 0.0 {
            self.terms.push((var, coef));
        }
    }

    /// Adds `scale·other`.
    pub fn add_scaled(&mut self, other: &LinearExpr, scale: f64) {
        if scale == 0.0 {
            return;
        }
        for &(v, c) in &other.terms {
            self.add_term(v, c * scale);
        }
        self.constant += other.constant * scale;
    }

    /// Returns the sum of two expressions.
    pub fn plus(mut self, other: &LinearExpr) -> Self {
        self.add_scaled(other, 1.0);
        self
    }

    /// Returns `self − other`.
    pub fn minus(mut self, other: &LinearExpr) -> Self {
        self.add_scaled(other, -1.0);
        self
    }

    /// The `(variable, coefficient)` pairs.
    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    /// The constant offset.
    pub fn constant_value(&self) -> f64 {
        self.constant
    }

    /// Evaluates the expression at the given variable values.
    ///
    /// # Panics
    ///
    /// Panics if `values` is shorter than the largest referenced index.
    pub fn eval(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(v, c)| c * values[v.0])
            .sum::<f64>()
            + self.constant
    }

    /// Largest absolute coefficient, used to scale feasibility tolerances.
    pub fn max_abs_coef(&self) -> f64 {
        self.terms.iter().map(|&(_, c)| c.abs()).fold(0.0, f64::max)
    }
}
