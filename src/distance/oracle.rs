//! Round-trip cost of a visiting order.

use crate::error::Result;
use crate::models::check_order;

use super::DistanceMatrix;

/// Prices an order as depot → p0 → … → pk → depot.
///
/// Orders index the active points from 0; the matrix is offset by one because
/// index 0 holds the depot.
///
/// # Examples
///
/// ```
/// use u_collect::distance::{CostOracle, DistanceMatrix};
///
/// // depot, a, b on a line at 0, 1, 2.
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 1.0, 2.0,
///     1.0, 0.0, 1.0,
///     2.0, 1.0, 0.0,
/// ]).unwrap();
/// let oracle = CostOracle::new(&dm);
/// assert_eq!(oracle.cost(&[0, 1]), 4.0);
/// assert_eq!(oracle.cost(&[]), 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CostOracle<'a> {
    distances: &'a DistanceMatrix,
}

impl<'a> CostOracle<'a> {
    /// Wraps a matrix whose index 0 is the depot.
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self { distances }
    }

    /// Number of points an order may reference.
    pub fn num_points(&self) -> usize {
        self.distances.num_points()
    }

    /// The underlying matrix.
    pub fn distances(&self) -> &'a DistanceMatrix {
        self.distances
    }

    /// Round-trip distance of `order` in kilometers.
    ///
    /// # Panics
    ///
    /// Panics if an index is not below [`num_points`](Self::num_points).
    pub fn cost(&self, order: &[usize]) -> f64 {
        if order.is_empty() {
            return 0.0;
        }
        let mut total = 0.0;
        let mut current = 0;
        for &idx in order {
            let next = idx + 1;
            total += self.distances.get(current, next);
            current = next;
        }
        total + self.distances.get(current, 0)
    }

    /// Like [`cost`](Self::cost), but rejects out-of-range or repeated
    /// indices instead of panicking.
    pub fn checked_cost(&self, order: &[usize]) -> Result<f64> {
        check_order(order, self.num_points())?;
        Ok(self.cost(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::haversine;
    use crate::error::RoutingError;
    use crate::models::Location;

    fn line() -> DistanceMatrix {
        // depot at 0, points at 1, 2, 3 on a line
        let coords: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
        let mut dm = DistanceMatrix::new(4);
        for (i, a) in coords.iter().enumerate() {
            for (j, b) in coords.iter().enumerate() {
                dm.set(i, j, (a - b).abs());
            }
        }
        dm
    }

    #[test]
    fn test_cost_in_order() {
        let dm = line();
        let oracle = CostOracle::new(&dm);
        // 0→1→2→3→0 = 6
        assert!((oracle.cost(&[0, 1, 2]) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_cost_zigzag() {
        let dm = line();
        let oracle = CostOracle::new(&dm);
        // 0→3→1→2→0 = 3 + 2 + 1 + 2 = 8
        assert!((oracle.cost(&[2, 0, 1]) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_cost_single_point_round_trip() {
        let depot = Location::new(0.0, 0.0);
        let p = Location::new(0.5, 0.5);
        let dm = DistanceMatrix::build(depot, &[p]);
        let oracle = CostOracle::new(&dm);
        let expected = 2.0 * haversine(0.0, 0.0, 0.5, 0.5);
        assert!((oracle.cost(&[0]) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_checked_cost_rejects_bad_orders() {
        let dm = line();
        let oracle = CostOracle::new(&dm);
        assert_eq!(
            oracle.checked_cost(&[0, 3]).unwrap_err(),
            RoutingError::IndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(
            oracle.checked_cost(&[1, 1]).unwrap_err(),
            RoutingError::DuplicateIndex(1)
        );
        assert_eq!(oracle.checked_cost(&[1, 0]).expect("valid"), oracle.cost(&[1, 0]));
    }
}
