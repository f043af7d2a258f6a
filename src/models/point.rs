//! Locations and demand points.

use serde::{Deserialize, Serialize};

use crate::distance::haversine;

/// A geographic coordinate in decimal degrees.
///
/// # Examples
///
/// ```
/// use u_collect::models::Location;
///
/// let a = Location::new(0.0, 0.0);
/// let b = Location::new(0.0, 1.0);
/// assert!((a.haversine_to(&b) - 111.19).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Location {
    /// Creates a location from latitude and longitude.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Great-circle distance to another location, in kilometers.
    pub fn haversine_to(&self, other: &Location) -> f64 {
        haversine(self.lat, self.lon, other.lat, other.lon)
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// A location with a quantity waiting to be collected.
///
/// The optional container capacity is only consulted when choosing which
/// points are worth visiting (see [`select_for_collection`]).
///
/// [`select_for_collection`]: crate::plan::select_for_collection
///
/// # Examples
///
/// ```
/// use u_collect::models::{DemandPoint, Location};
///
/// let p = DemandPoint::new(3, Location::new(20.29, 85.82), 120.0).with_capacity(200.0);
/// assert_eq!(p.id(), 3);
/// assert_eq!(p.quantity(), 120.0);
/// assert_eq!(p.capacity(), Some(200.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    id: usize,
    location: Location,
    quantity: f64,
    #[serde(default)]
    capacity: Option<f64>,
}

impl DemandPoint {
    /// Creates a demand point without a known container capacity.
    pub fn new(id: usize, location: Location, quantity: f64) -> Self {
        Self {
            id,
            location,
            quantity,
            capacity: None,
        }
    }

    /// Sets the container capacity of this point.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Caller-assigned identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Where the point is.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Quantity to collect (kg).
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Container capacity, if known.
    pub fn capacity(&self) -> Option<f64> {
        self.capacity
    }
}
