//! Domain model types for collection routing.
//!
//! A request is an [`Instance`]: one depot and the [`DemandPoint`]s to visit.
//! Orders and routes refer to points by their position in the instance.

mod instance;
mod point;

pub(crate) use instance::check_order;
pub use instance::Instance;
pub use point::{DemandPoint, Location};
