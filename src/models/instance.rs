//! A validated problem instance: one depot plus the points to collect.

use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};

use super::{DemandPoint, Location};

/// Depot and demand points for a single optimization request.
///
/// Construction validates every coordinate and quantity, so downstream
/// code can index and sum without re-checking.
///
/// # Examples
///
/// ```
/// use u_collect::models::{DemandPoint, Instance, Location};
///
/// let instance = Instance::new(
///     Location::new(0.0, 0.0),
///     vec![
///         DemandPoint::new(0, Location::new(0.0, 1.0), 60.0),
///         DemandPoint::new(1, Location::new(1.0, 0.0), 50.0),
///     ],
/// )
/// .unwrap();
/// assert_eq!(instance.len(), 2);
/// assert_eq!(instance.distance_matrix().size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    depot: Location,
    points: Vec<DemandPoint>,
}

impl Instance {
    /// Creates an instance, rejecting non-finite coordinates and negative or
    /// non-finite quantities.
    pub fn new(depot: Location, points: Vec<DemandPoint>) -> Result<Self> {
        if !depot.is_finite() {
            return Err(RoutingError::NonFiniteCoordinate {
                what: "depot".to_string(),
                lat: depot.lat,
                lon: depot.lon,
            });
        }
        for p in &points {
            let loc = p.location();
            if !loc.is_finite() {
                return Err(RoutingError::NonFiniteCoordinate {
                    what: format!("point {}", p.id()),
                    lat: loc.lat,
                    lon: loc.lon,
                });
            }
            if !p.quantity().is_finite() || p.quantity() < 0.0 {
                return Err(RoutingError::InvalidQuantity {
                    id: p.id(),
                    quantity: p.quantity(),
                });
            }
        }
        Ok(Self { depot, points })
    }

    /// Builds an instance from parallel location and quantity slices.
    ///
    /// Point ids are assigned from slice positions.
    pub fn from_parts(depot: Location, locations: &[Location], quantities: &[f64]) -> Result<Self> {
        if locations.len() != quantities.len() {
            return Err(RoutingError::MismatchedCounts {
                locations: locations.len(),
                quantities: quantities.len(),
            });
        }
        let points = locations
            .iter()
            .zip(quantities)
            .enumerate()
            .map(|(id, (&loc, &q))| DemandPoint::new(id, loc, q))
            .collect();
        Self::new(depot, points)
    }

    /// Returns a new instance restricted to `indices`, in that order.
    ///
    /// Index `k` of the result corresponds to `indices[k]` of `self`.
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        check_order(indices, self.points.len())?;
        Ok(Self {
            depot: self.depot,
            points: indices.iter().map(|&i| self.points[i].clone()).collect(),
        })
    }

    /// The depot location.
    pub fn depot(&self) -> Location {
        self.depot
    }

    /// All demand points in instance order.
    pub fn points(&self) -> &[DemandPoint] {
        &self.points
    }

    /// Number of demand points (excluding the depot).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no demand points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Builds the haversine distance matrix (index 0 = depot).
    pub fn distance_matrix(&self) -> DistanceMatrix {
        let locations: Vec<Location> = self.points.iter().map(DemandPoint::location).collect();
        DistanceMatrix::build(self.depot, &locations)
    }
}

/// Checks that `order` holds distinct indices below `len`.
pub(crate) fn check_order(order: &[usize], len: usize) -> Result<()> {
    let mut seen = vec![false; len];
    for &index in order {
        if index >= len {
            return Err(RoutingError::IndexOutOfRange { index, len });
        }
        if seen[index] {
            return Err(RoutingError::DuplicateIndex(index));
        }
        seen[index] = true;
    }
    Ok(())
}
