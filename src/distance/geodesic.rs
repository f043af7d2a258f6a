//! Point-to-point distance formulas.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in kilometers.
///
/// Inputs are decimal degrees and are not range-checked.
///
/// # Examples
///
/// ```
/// use u_collect::distance::haversine;
///
/// // One degree of longitude on the equator.
/// let d = haversine(0.0, 0.0, 0.0, 1.0);
/// assert!((d - 111.195).abs() < 1e-3);
/// ```
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Manhattan distance on raw degrees.
///
/// A cheap approximation; the result is in degrees, not kilometers.
pub fn manhattan(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    (lat2 - lat1).abs() + (lon2 - lon1).abs()
}
