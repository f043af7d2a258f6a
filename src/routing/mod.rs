//! From a visiting order to priced vehicle routes.
//!
//! - [`create_routes`] - greedy capacity split of an order
//! - [`RouteEvaluator`] - per-route metrics and fleet totals under a [`CostModel`]

mod metrics;
mod split;

pub use metrics::{CostModel, FleetSummary, RouteEvaluator, RouteMetrics};
pub use split::create_routes;
