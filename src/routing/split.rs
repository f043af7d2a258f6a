//! Capacity split of a visiting order into vehicle routes.
//!
//! # Algorithm
//!
//! Greedy first-fit over the order: points are appended to the open route
//! until the next one would push its load above capacity; that point then
//! opens a new route. A point heavier than the whole capacity still gets a
//! route of its own rather than being rejected.
//!
//! Routes keep the relative order of the input, so concatenating them gives
//! back the order unchanged.
//!
//! # Complexity
//!
//! O(n) where n = length of the order.

use crate::error::{Result, RoutingError};
use crate::models::{check_order, DemandPoint};

/// Splits `order` into routes whose loads fit `capacity`.
///
/// `order` holds indices into `points`; the returned routes hold the same
/// indices.
///
/// # Errors
///
/// [`RoutingError::InvalidConfiguration`] if `capacity` is not positive and
/// finite; [`RoutingError::IndexOutOfRange`] or
/// [`RoutingError::DuplicateIndex`] for a malformed order.
///
/// # Examples
///
/// ```
/// use u_collect::models::{DemandPoint, Location};
/// use u_collect::routing::create_routes;
///
/// let points: Vec<DemandPoint> = [60.0, 50.0, 30.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &q)| DemandPoint::new(i, Location::new(0.0, i as f64), q))
///     .collect();
///
/// let routes = create_routes(&[0, 1, 2], &points, 100.0).unwrap();
/// assert_eq!(routes, vec![vec![0], vec![1, 2]]);
/// ```
pub fn create_routes(order: &[usize], points: &[DemandPoint], capacity: f64) -> Result<Vec<Vec<usize>>> {
    if !(capacity.is_finite() && capacity > 0.0) {
        return Err(RoutingError::InvalidConfiguration(format!(
            "capacity must be positive, got {capacity}"
        )));
    }
    check_order(order, points.len())?;

    let mut routes = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut load = 0.0;

    for &idx in order {
        let quantity = points[idx].quantity();
        if load + quantity > capacity {
            if !current.is_empty() {
                routes.push(std::mem::take(&mut current));
            }
            current.push(idx);
            load = quantity;
        } else {
            current.push(idx);
            load += quantity;
        }
    }

    if !current.is_empty() {
        routes.push(current);
    }

    Ok(routes)
}
