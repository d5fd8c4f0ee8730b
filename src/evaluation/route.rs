//! Tour reconstruction from an arc-selection matrix.

/// A square boolean matrix of selected arcs.
///
/// # Examples
///
/// ```
/// use u_itinerary::evaluation::ArcMatrix;
///
/// let arcs = ArcMatrix::from_values(2, &[0.0, 0.9999999, 1.0, 1e-9]);
/// assert!(arcs.get(0, 1));
/// assert!(!arcs.get(1, 1));
/// assert_eq!(arcs.successors(1), vec![0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcMatrix {
    cells: Vec<bool>,
    size: usize,
}

impl ArcMatrix {
    /// Creates an empty matrix.
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![false; size * size],
            size,
        }
    }

    /// Builds a matrix from row-major solver values; a cell is set when its
    /// value rounds to 1.
    ///
    /// Missing trailing values count as unset, extra values are ignored.
    pub fn from_values(size: usize, values: &[f64]) -> Self {
        let mut m = Self::new(size);
        for (cell, &v) in m.cells.iter_mut().zip(values) {
            *cell = v > 0.5;
        }
        m
    }

    /// Builds a matrix with the given arcs set.
    pub fn from_arcs(size: usize, arcs: &[(usize, usize)]) -> Self {
        let mut m = Self::new(size);
        for &(from, to) in arcs {
            m.set(from, to, true);
        }
        m
    }

    /// Whether arc `from → to` is selected.
    pub fn get(&self, from: usize, to: usize) -> bool {
        self.cells[from * self.size + to]
    }

    /// Selects or clears arc `from → to`.
    pub fn set(&mut self, from: usize, to: usize, selected: bool) {
        self.cells[from * self.size + to] = selected;
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cities reachable from `from` over one selected arc, ascending.
    pub fn successors(&self, from: usize) -> Vec<usize> {
        (0..self.size).filter(|&to| self.get(from, to)).collect()
    }

    /// Iterates the selected arcs in row-major order.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(k, _)| (k / self.size, k % self.size))
    }

    /// Number of selected arcs leaving `city`.
    pub fn out_degree(&self, city: usize) -> usize {
        (0..self.size).filter(|&to| self.get(city, to)).count()
    }

    /// Number of selected arcs entering `city`.
    pub fn in_degree(&self, city: usize) -> usize {
        (0..self.size).filter(|&from| self.get(from, city)).count()
    }
}

/// Follows selected arcs from home (city 0) and returns the visit order.
///
/// At each step the current city must have exactly one successor. The walk
/// stops after returning to home, when the successor is missing or
/// ambiguous, or unconditionally after `n + 5` steps. The result always
/// starts with 0 and ends with 0 only for a closed tour; anything else is a
/// partial trace of where decoding broke down.
///
/// # Examples
///
/// ```
/// use u_itinerary::evaluation::{reconstruct_route, is_closed_tour, ArcMatrix};
///
/// let tour = ArcMatrix::from_arcs(4, &[(0, 2), (2, 1), (1, 0)]);
/// assert_eq!(reconstruct_route(&tour), vec![0, 2, 1, 0]);
///
/// // City 2 has two successors: decoding stops there.
/// let broken = ArcMatrix::from_arcs(4, &[(0, 2), (2, 1), (2, 3)]);
/// let route = reconstruct_route(&broken);
/// assert_eq!(route, vec![0, 2]);
/// assert!(!is_closed_tour(&route));
/// ```
pub fn reconstruct_route(arcs: &ArcMatrix) -> Vec<usize> {
    let n = arcs.size();
    let mut route = vec![0];
    if n == 0 {
        return route;
    }
    let mut current = 0;
    let mut steps = 0;

    loop {
        let next = arcs.successors(current);
        if next.len() != 1 {
            break;
        }
        current = next[0];
        route.push(current);
        steps += 1;

        if current == 0 || steps > n + 5 {
            break;
        }
    }
    route
}

/// Returns `true` if `route` leaves home and comes back to it.
pub fn is_closed_tour(route: &[usize]) -> bool {
    route.len() >= 2 && route.first() == Some(&0) && route.last() == Some(&0)
}
