//! Dense distance matrix with the depot at index 0.

use crate::models::Location;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built from a depot and a list of point locations: index 0 is the depot and
/// index `i + 1` is point `i`. Entries are haversine kilometers.
///
/// # Examples
///
/// ```
/// use u_collect::models::Location;
/// use u_collect::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::build(
///     Location::new(0.0, 0.0),
///     &[Location::new(0.0, 1.0), Location::new(1.0, 0.0)],
/// );
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(1, 1), 0.0);
/// assert_eq!(dm.get(1, 2), dm.get(2, 1));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the haversine matrix over `depot` followed by `points`.
    ///
    /// Only the upper triangle is computed; it is mirrored into the lower one.
    pub fn build(depot: Location, points: &[Location]) -> Self {
        let locations: Vec<Location> = std::iter::once(depot).chain(points.iter().copied()).collect();
        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = locations[i].haversine_to(&locations[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix, depot included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of demand points (size minus the depot).
    pub fn num_points(&self) -> usize {
        self.size.saturating_sub(1)
    }

    /// Copies out the sub-matrix over the depot and the given points.
    ///
    /// Point `k` of the result is point `points[k]` of `self`, so an order
    /// found on the restricted matrix maps back through `points`.
    ///
    /// # Panics
    ///
    /// Panics if any entry of `points` is not a point of this matrix.
    pub fn restrict(&self, points: &[usize]) -> Self {
        let index: Vec<usize> = std::iter::once(0).chain(points.iter().map(|&p| p + 1)).collect();
        let mut dm = Self::new(index.len());
        for (i, &from) in index.iter().enumerate() {
            for (j, &to) in index.iter().enumerate() {
                dm.set(i, j, self.get(from, to));
            }
        }
        dm
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::haversine;

    fn sample() -> DistanceMatrix {
        DistanceMatrix::build(
            Location::new(20.2961, 85.8245),
            &[
                Location::new(20.3520, 85.8140),
                Location::new(20.2700, 85.8400),
                Location::new(20.3100, 85.8600),
            ],
        )
    }

    #[test]
    fn test_build_size_and_diagonal() {
        let dm = sample();
        assert_eq!(dm.size(), 4);
        assert_eq!(dm.num_points(), 3);
        for i in 0..dm.size() {
            assert_eq!(dm.get(i, i), 0.0);
        }
    }

    #[test]
    fn test_build_matches_haversine() {
        let dm = sample();
        let expected = haversine(20.2961, 85.8245, 20.3520, 85.8140);
        assert_eq!(dm.get(0, 1), expected);
        let expected = haversine(20.2700, 85.8400, 20.3100, 85.8600);
        assert_eq!(dm.get(2, 3), expected);
    }

    #[test]
    fn test_symmetric() {
        let dm = sample();
        assert!(dm.is_symmetric(0.0));
    }

    #[test]
    fn test_build_depot_only() {
        let dm = DistanceMatrix::build(Location::new(0.0, 0.0), &[]);
        assert_eq!(dm.size(), 1);
        assert_eq!(dm.num_points(), 0);
        assert_eq!(dm.get(0, 0), 0.0);
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_restrict_maps_points() {
        let dm = sample();
        let sub = dm.restrict(&[2, 0]);
        assert_eq!(sub.size(), 3);
        assert_eq!(sub.get(0, 1), dm.get(0, 3));
        assert_eq!(sub.get(0, 2), dm.get(0, 1));
        assert_eq!(sub.get(1, 2), dm.get(3, 1));
        assert_eq!(sub.get(2, 2), 0.0);
    }

    #[test]
    fn test_restrict_empty_keeps_depot() {
        let sub = sample().restrict(&[]);
        assert_eq!(sub.size(), 1);
        assert_eq!(sub.num_points(), 0);
    }
}
