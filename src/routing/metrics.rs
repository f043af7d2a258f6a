//! Per-route and fleet-wide cost, time, fuel and emission metrics.

use serde::{Deserialize, Serialize};

use crate::distance::{CostOracle, DistanceMatrix};
use crate::error::{Result, RoutingError};
use crate::models::{check_order, DemandPoint};

/// Vehicle and tariff assumptions used to price a route.
///
/// Defaults describe a municipal collection truck: 25 km/h average speed,
/// 8 minutes per stop, 0.40 L/km, fuel at 95 per litre, driver at 200 per
/// hour and 2.68 kg CO₂ per litre of diesel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Average travel speed in km/h.
    pub avg_speed_kmh: f64,
    /// Service time per visited point, in hours.
    pub service_hours_per_point: f64,
    /// Fuel consumption in litres per km.
    pub fuel_litres_per_km: f64,
    /// Fuel price per litre.
    pub fuel_price: f64,
    /// Driver cost per hour.
    pub driver_rate: f64,
    /// kg of CO₂ emitted per litre of fuel.
    pub co2_kg_per_litre: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            avg_speed_kmh: 25.0,
            service_hours_per_point: 8.0 / 60.0,
            fuel_litres_per_km: 0.40,
            fuel_price: 95.0,
            driver_rate: 200.0,
            co2_kg_per_litre: 2.68,
        }
    }
}

impl CostModel {
    /// Requires a positive speed and non-negative finite rates.
    pub fn validate(&self) -> Result<()> {
        if !(self.avg_speed_kmh.is_finite() && self.avg_speed_kmh > 0.0) {
            return Err(RoutingError::InvalidConfiguration(format!(
                "avg_speed_kmh must be positive, got {}",
                self.avg_speed_kmh
            )));
        }
        for (name, value) in [
            ("service_hours_per_point", self.service_hours_per_point),
            ("fuel_litres_per_km", self.fuel_litres_per_km),
            ("fuel_price", self.fuel_price),
            ("driver_rate", self.driver_rate),
            ("co2_kg_per_litre", self.co2_kg_per_litre),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RoutingError::InvalidConfiguration(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Metrics of one route, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteMetrics {
    /// Depot round-trip distance.
    pub distance_km: f64,
    /// Driving plus service time.
    pub time_hours: f64,
    /// Total quantity collected.
    pub waste_kg: f64,
    /// Fuel burned.
    pub fuel_liters: f64,
    /// Fuel cost plus driver cost.
    pub total_cost: f64,
    /// Emissions from the fuel burned.
    pub co2_kg: f64,
    /// Number of points on the route.
    pub bins_visited: usize,
}

/// Sum of [`RouteMetrics`] over a set of routes.
///
/// Each field is summed over its values in ascending order, so the result
/// does not depend on the order of the routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FleetSummary {
    /// Total distance.
    pub distance_km: f64,
    /// Total time.
    pub time_hours: f64,
    /// Total quantity collected.
    pub waste_kg: f64,
    /// Total fuel.
    pub fuel_liters: f64,
    /// Total cost.
    pub total_cost: f64,
    /// Total emissions.
    pub co2_kg: f64,
    /// Total points visited.
    pub bins_visited: usize,
    /// Number of routes.
    pub num_routes: usize,
}

impl FleetSummary {
    /// Aggregates already-computed route metrics.
    pub fn from_routes(routes: &[RouteMetrics]) -> Self {
        let sum = |field: fn(&RouteMetrics) -> f64| -> f64 {
            let mut values: Vec<f64> = routes.iter().map(field).collect();
            values.sort_by(f64::total_cmp);
            round2(values.iter().sum())
        };
        Self {
            distance_km: sum(|m| m.distance_km),
            time_hours: sum(|m| m.time_hours),
            waste_kg: sum(|m| m.waste_kg),
            fuel_liters: sum(|m| m.fuel_liters),
            total_cost: sum(|m| m.total_cost),
            co2_kg: sum(|m| m.co2_kg),
            bins_visited: routes.iter().map(|m| m.bins_visited).sum(),
            num_routes: routes.len(),
        }
    }
}

fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// Prices routes over an instance's points and distance matrix.
///
/// Route entries are point indices; the matrix must have the depot at index 0
/// and point `i` at index `i + 1`.
///
/// # Examples
///
/// ```
/// use u_collect::models::{DemandPoint, Instance, Location};
/// use u_collect::routing::{CostModel, RouteEvaluator};
///
/// let instance = Instance::new(
///     Location::new(0.0, 0.0),
///     vec![
///         DemandPoint::new(0, Location::new(0.0, 0.1), 40.0),
///         DemandPoint::new(1, Location::new(0.1, 0.1), 25.0),
///     ],
/// )
/// .unwrap();
/// let dm = instance.distance_matrix();
/// let model = CostModel::default();
/// let evaluator = RouteEvaluator::new(instance.points(), &dm, &model).unwrap();
///
/// let metrics = evaluator.evaluate(&[0, 1]).unwrap();
/// assert_eq!(metrics.bins_visited, 2);
/// assert_eq!(metrics.waste_kg, 65.0);
///
/// let summary = evaluator.aggregate(&[vec![0], vec![1]]).unwrap();
/// assert_eq!(summary.num_routes, 2);
/// ```
pub struct RouteEvaluator<'a> {
    points: &'a [DemandPoint],
    oracle: CostOracle<'a>,
    model: &'a CostModel,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator after checking the model and that the matrix
    /// covers every point.
    pub fn new(points: &'a [DemandPoint], distances: &'a DistanceMatrix, model: &'a CostModel) -> Result<Self> {
        model.validate()?;
        if distances.num_points() != points.len() {
            return Err(RoutingError::MismatchedCounts {
                locations: distances.num_points(),
                quantities: points.len(),
            });
        }
        Ok(Self {
            points,
            oracle: CostOracle::new(distances),
            model,
        })
    }

    /// Metrics of a single route.
    pub fn evaluate(&self, route: &[usize]) -> Result<RouteMetrics> {
        check_order(route, self.points.len())?;

        let distance = self.oracle.cost(route);
        let waste: f64 = route.iter().map(|&i| self.points[i].quantity()).sum();
        let bins_visited = route.len();

        let time = distance / self.model.avg_speed_kmh
            + bins_visited as f64 * self.model.service_hours_per_point;
        let fuel = distance * self.model.fuel_litres_per_km;
        let total_cost = fuel * self.model.fuel_price + time * self.model.driver_rate;
        let co2 = fuel * self.model.co2_kg_per_litre;

        Ok(RouteMetrics {
            distance_km: round2(distance),
            time_hours: round2(time),
            waste_kg: round2(waste),
            fuel_liters: round2(fuel),
            total_cost: round2(total_cost),
            co2_kg: round2(co2),
            bins_visited,
        })
    }

    /// Metrics of every route, in input order.
    pub fn evaluate_all(&self, routes: &[Vec<usize>]) -> Result<Vec<RouteMetrics>> {
        routes.iter().map(|r| self.evaluate(r)).collect()
    }

    /// Fleet-wide totals over `routes`.
    pub fn aggregate(&self, routes: &[Vec<usize>]) -> Result<FleetSummary> {
        Ok(FleetSummary::from_routes(&self.evaluate_all(routes)?))
    }
}
