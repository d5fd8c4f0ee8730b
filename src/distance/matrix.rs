//! Dense directed cost matrix.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A dense n×n matrix of directed edge weights stored in row-major order.
///
/// Used for both travel time and travel cost between cities. Entries may be
/// asymmetric; the diagonal is ignored because self-arcs are never allowed.
///
/// # Examples
///
/// ```
/// use u_itinerary::distance::CostMatrix;
///
/// let m = CostMatrix::from_rows(vec![
///     vec![0.0, 4.0],
///     vec![6.0, 0.0],
/// ]).expect("square");
/// assert_eq!(m.get(0, 1), 4.0);
/// assert_eq!(m.get(1, 0), 6.0);
/// assert!(!m.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix with `value` on every off-diagonal entry.
    pub fn uniform(size: usize, value: f64) -> Self {
        let mut m = Self::new(size);
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    m.set(i, j, value);
                }
            }
        }
        m
    }

    /// Creates a symmetric Euclidean matrix from planar coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut m = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                let d = (dx * dx + dy * dy).sqrt();
                m.set(i, j, d);
                m.set(j, i, d);
            }
        }
        m
    }

    /// Creates a matrix from nested rows.
    ///
    /// Returns `None` if the rows do not form a square grid.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.into_iter().flatten().collect(),
            size,
        })
    }

    /// Returns the weight of arc `from → to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the weight of arc `from → to`.
    pub fn set(&mut self, from: usize, to: usize, weight: f64) {
        self.data[from * self.size + to] = weight;
    }

    /// Number of cities covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns a copy with every entry multiplied by `factor` and shifted by
    /// `offset` off the diagonal.
    pub fn affine(&self, factor: f64, offset: f64) -> Self {
        let mut m = Self::new(self.size);
        for i in 0..self.size {
            for j in 0..self.size {
                if i != j {
                    m.set(i, j, self.get(i, j) * factor + offset);
                }
            }
        }
        m
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Checks the matrix covers `n` cities with finite, non-negative
    /// off-diagonal entries.
    pub fn validate(&self, what: &'static str, n: usize) -> Result<(), ValidationError> {
        if self.size != n || self.data.len() != n * n {
            return Err(ValidationError::DimensionMismatch {
                what,
                expected: n,
                actual: self.size,
            });
        }
        for from in 0..n {
            for to in 0..n {
                if from == to {
                    continue;
                }
                let value = self.get(from, to);
                if !value.is_finite() {
                    return Err(ValidationError::NonFinite { what });
                }
                if value < 0.0 {
                    return Err(ValidationError::NegativeWeight {
                        what,
                        from,
                        to,
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_leaves_diagonal() {
        let m = CostMatrix::uniform(3, 5.0);
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 2), 5.0);
        assert_eq!(m.get(2, 1), 5.0);
        assert!(m.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_points() {
        let m = CostMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (0.0, 8.0)]);
        assert_eq!(m.size(), 3);
        assert!((m.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((m.get(2, 0) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_rows_not_square() {
        assert!(CostMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0]]).is_none());
    }

    #[test]
    fn test_affine_skips_diagonal() {
        let m = CostMatrix::uniform(2, 10.0).affine(0.5, 2.0);
        assert_eq!(m.get(0, 1), 7.0);
        assert_eq!(m.get(1, 1), 0.0);
    }

    #[test]
    fn test_validate_dimension() {
        let m = CostMatrix::new(2);
        assert_eq!(
            m.validate("travel_time", 3),
            Err(ValidationError::DimensionMismatch {
                what: "travel_time",
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_validate_negative_ignores_diagonal() {
        let mut m = CostMatrix::uniform(2, 1.0);
        m.set(0, 0, -1.0);
        assert!(m.validate("travel_cost", 2).is_ok());
        m.set(1, 0, -2.0);
        assert!(matches!(
            m.validate("travel_cost", 2),
            Err(ValidationError::NegativeWeight { from: 1, to: 0, .. })
        ));
    }

    #[test]
    fn test_validate_nan() {
        let mut m = CostMatrix::uniform(2, 1.0);
        m.set(0, 1, f64::NAN);
        assert_eq!(
            m.validate("travel_time", 2),
            Err(ValidationError::NonFinite {
                what: "travel_time"
            })
        );
    }
}
