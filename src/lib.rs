//! # u-collect
//!
//! Collection route optimization over geographic demand points: a haversine
//! distance matrix, three visiting-order strategies, capacity-based route
//! splitting and per-route cost, fuel and emission metrics.
//!
//! ## Modules
//!
//! - [`models`] - Depot, demand points and validated instances
//! - [`distance`] - Haversine distances, the distance matrix and the round-trip cost oracle
//! - [`optimize`] - Genetic algorithm, simulated annealing and nearest neighbor
//! - [`routing`] - Capacity split of an order and route metrics
//! - [`plan`] - Point selection, end-to-end planning and strategy comparison
//! - [`random`] - Seeded random generators
//! - [`error`] - Error type shared by all modules
//!
//! ## Example
//!
//! ```
//! use u_collect::models::{DemandPoint, Instance, Location};
//! use u_collect::plan::{EngineConfig, Planner};
//!
//! let instance = Instance::from_parts(
//!     Location::new(20.2961, 85.8245),
//!     &[
//!         Location::new(20.3520, 85.8140),
//!         Location::new(20.2700, 85.8400),
//!         Location::new(20.3100, 85.8600),
//!     ],
//!     &[600.0, 500.0, 300.0],
//! )
//! .unwrap();
//!
//! let config = EngineConfig::default().with_vehicle_capacity(1000.0);
//! let planner = Planner::new(&instance, config).unwrap();
//! let plans = planner.compare(&planner.config().strategies(), &[0, 1, 2]).unwrap();
//!
//! assert_eq!(plans.len(), 4);
//! for plan in &plans {
//!     assert_eq!(plan.summary.bins_visited, 3);
//! }
//! ```

pub mod distance;
pub mod error;
pub mod models;
pub mod optimize;
pub mod plan;
pub mod random;
pub mod routing;

pub use error::{Result, RoutingError};
