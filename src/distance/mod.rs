//! Distances and the round-trip cost oracle.
//!
//! - [`haversine`] - great-circle kilometers between two coordinates
//! - [`DistanceMatrix`] - depot-first dense matrix over an instance
//! - [`CostOracle`] - prices a visiting order as a depot round trip

mod geodesic;
mod matrix;
mod oracle;

pub use geodesic::{haversine, manhattan, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
pub use oracle::CostOracle;
