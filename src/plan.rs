//! End-to-end collection planning.
//!
//! A [`Planner`] owns one distance matrix for an [`Instance`] and turns a set
//! of selected points into a priced [`Plan`]:
//!
//! 1. pick the points worth visiting ([`select_for_collection`])
//! 2. order them with a [`Strategy`] on the restricted matrix
//! 3. map the order back to instance indices and split it into routes
//! 4. price every route and total the fleet
//!
//! [`Planner::compare`] runs several strategies over the same selection next
//! to the unoptimized baseline.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::distance::{CostOracle, DistanceMatrix};
use crate::error::{Result, RoutingError};
use crate::models::{check_order, DemandPoint, Instance};
use crate::optimize::{
    AnnealingConfig, GeneticAlgorithm, GeneticConfig, NearestNeighbor, OptimizationResult, Optimizer, Quota,
    SimulatedAnnealing,
};
use crate::random::create_rng;
use crate::routing::{create_routes, CostModel, FleetSummary, RouteEvaluator, RouteMetrics};

/// Label of the baseline plan produced by [`Planner::compare`].
pub const FIXED_ROUTE: &str = "Fixed Route";

/// Which points make it onto the collection list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// A point qualifies when its quantity exceeds this fraction of its own
    /// capacity.
    pub fill_threshold: f64,
    /// How many of the fullest points to take when none qualify.
    pub fallback_count: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            fill_threshold: 0.4,
            fallback_count: 5,
        }
    }
}

impl SelectionConfig {
    /// Sets the fill threshold.
    pub fn with_fill_threshold(mut self, fill_threshold: f64) -> Self {
        self.fill_threshold = fill_threshold;
        self
    }

    /// Sets the fallback count.
    pub fn with_fallback_count(mut self, fallback_count: usize) -> Self {
        self.fallback_count = fallback_count;
        self
    }

    /// Requires a non-negative finite threshold.
    pub fn validate(&self) -> Result<()> {
        if !(self.fill_threshold.is_finite() && self.fill_threshold >= 0.0) {
            return Err(RoutingError::InvalidConfiguration(format!(
                "fill_threshold must be non-negative, got {}",
                self.fill_threshold
            )));
        }
        Ok(())
    }
}

/// Everything a [`Planner`] needs besides the instance.
///
/// Every field has a default, so a partial document deserializes into a
/// complete configuration.
///
/// # Examples
///
/// ```
/// use u_collect::plan::EngineConfig;
///
/// let config = EngineConfig::default().with_vehicle_capacity(500.0).with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.genetic.population_size, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Genetic algorithm parameters.
    pub genetic: GeneticConfig,
    /// Simulated annealing parameters.
    pub annealing: AnnealingConfig,
    /// Route pricing assumptions.
    pub cost_model: CostModel,
    /// Load a single vehicle can carry.
    pub vehicle_capacity: f64,
    /// Point selection rule.
    pub selection: SelectionConfig,
    /// Seed for every stochastic strategy.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            genetic: GeneticConfig::default(),
            annealing: AnnealingConfig::default(),
            cost_model: CostModel::default(),
            vehicle_capacity: 10_000.0,
            selection: SelectionConfig::default(),
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Sets the genetic algorithm parameters.
    pub fn with_genetic(mut self, genetic: GeneticConfig) -> Self {
        self.genetic = genetic;
        self
    }

    /// Sets the annealing parameters.
    pub fn with_annealing(mut self, annealing: AnnealingConfig) -> Self {
        self.annealing = annealing;
        self
    }

    /// Sets the cost model.
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Sets the vehicle capacity.
    pub fn with_vehicle_capacity(mut self, vehicle_capacity: f64) -> Self {
        self.vehicle_capacity = vehicle_capacity;
        self
    }

    /// Sets the selection rule.
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the strategy seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.genetic.validate()?;
        self.annealing.validate()?;
        self.cost_model.validate()?;
        self.selection.validate()?;
        if !(self.vehicle_capacity.is_finite() && self.vehicle_capacity > 0.0) {
            return Err(RoutingError::InvalidConfiguration(format!(
                "vehicle_capacity must be positive, got {}",
                self.vehicle_capacity
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RoutingError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The three searching strategies with this configuration's parameters.
    pub fn strategies(&self) -> Vec<Strategy> {
        vec![
            Strategy::NearestNeighbor,
            Strategy::Genetic(self.genetic.clone()),
            Strategy::Annealing(self.annealing.clone()),
        ]
    }
}

/// A visiting-order search method.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// [`GeneticAlgorithm`] with the given parameters.
    Genetic(GeneticConfig),
    /// [`SimulatedAnnealing`] with the given parameters.
    Annealing(AnnealingConfig),
    /// [`NearestNeighbor`].
    NearestNeighbor,
}

impl Strategy {
    /// Display name, matching [`Optimizer::name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Genetic(_) => "Genetic Algorithm",
            Self::Annealing(_) => "Simulated Annealing",
            Self::NearestNeighbor => "Nearest Neighbor",
        }
    }
}

/// A priced collection plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    /// Strategy name, or [`FIXED_ROUTE`] for the baseline.
    pub strategy: String,
    /// Visiting order over instance point indices.
    pub order: Vec<usize>,
    /// `order` split by vehicle capacity.
    pub routes: Vec<Vec<usize>>,
    /// Metrics of each route, aligned with `routes`.
    pub route_metrics: Vec<RouteMetrics>,
    /// Fleet totals.
    pub summary: FleetSummary,
    /// Search outcome with `best_order` in instance indices; `None` for
    /// orders that were not searched.
    pub optimization: Option<OptimizationResult>,
}

/// Indices of the points that need collecting.
///
/// A point qualifies when its quantity exceeds `fill_threshold` times its
/// capacity; points without a capacity never qualify this way. When nothing
/// qualifies, the `fallback_count` points with the largest quantities are
/// returned instead, largest first.
///
/// # Examples
///
/// ```
/// use u_collect::models::{DemandPoint, Location};
/// use u_collect::plan::select_for_collection;
///
/// let loc = Location::new(0.0, 0.0);
/// let points = vec![
///     DemandPoint::new(0, loc, 300.0).with_capacity(1000.0),
///     DemandPoint::new(1, loc, 700.0).with_capacity(1000.0),
///     DemandPoint::new(2, loc, 450.0).with_capacity(1000.0),
/// ];
/// assert_eq!(select_for_collection(&points, 0.4, 5), vec![1, 2]);
/// assert_eq!(select_for_collection(&points, 0.9, 2), vec![1, 2]);
/// ```
pub fn select_for_collection(points: &[DemandPoint], fill_threshold: f64, fallback_count: usize) -> Vec<usize> {
    let selected: Vec<usize> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.capacity().is_some_and(|c| p.quantity() > fill_threshold * c))
        .map(|(i, _)| i)
        .collect();
    if !selected.is_empty() {
        return selected;
    }

    let mut fullest = demand_descending_order(points, &(0..points.len()).collect::<Vec<_>>());
    fullest.truncate(fallback_count);
    fullest
}

/// The baseline order: the selection as given.
pub fn fixed_order(subset: &[usize]) -> Vec<usize> {
    subset.to_vec()
}

/// `subset` sorted by quantity, largest first; ties keep their input order.
///
/// # Panics
///
/// Panics if `subset` holds an index outside `points`.
pub fn demand_descending_order(points: &[DemandPoint], subset: &[usize]) -> Vec<usize> {
    let mut order = subset.to_vec();
    order.sort_by(|&a, &b| points[b].quantity().total_cmp(&points[a].quantity()));
    order
}

/// Plans collection routes over one instance.
///
/// # Examples
///
/// ```
/// use u_collect::models::{DemandPoint, Instance, Location};
/// use u_collect::plan::{EngineConfig, Planner, Strategy};
///
/// let instance = Instance::new(
///     Location::new(0.0, 0.0),
///     vec![
///         DemandPoint::new(0, Location::new(0.0, 0.02), 60.0),
///         DemandPoint::new(1, Location::new(0.02, 0.0), 50.0),
///         DemandPoint::new(2, Location::new(0.02, 0.02), 30.0),
///     ],
/// )
/// .unwrap();
/// let config = EngineConfig::default().with_vehicle_capacity(100.0);
/// let planner = Planner::new(&instance, config).unwrap();
///
/// let plan = planner.plan(&Strategy::NearestNeighbor, &[0, 1, 2]).unwrap();
/// assert_eq!(plan.order.len(), 3);
/// assert_eq!(plan.summary.bins_visited, 3);
/// assert_eq!(plan.summary.num_routes, plan.routes.len());
/// ```
pub struct Planner<'a> {
    instance: &'a Instance,
    config: EngineConfig,
    distances: DistanceMatrix,
    quota: Quota,
}

impl<'a> Planner<'a> {
    /// Validates `config` and builds the instance's distance matrix.
    pub fn new(instance: &'a Instance, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            instance,
            config,
            distances: instance.distance_matrix(),
            quota: Quota::default(),
        })
    }

    /// Attaches a quota passed on to every stochastic strategy run.
    pub fn with_quota(mut self, quota: Quota) -> Self {
        self.quota = quota;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Distance matrix over the whole instance.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Applies the configured selection rule to the instance.
    pub fn select(&self) -> Vec<usize> {
        let selection = &self.config.selection;
        select_for_collection(self.instance.points(), selection.fill_threshold, selection.fallback_count)
    }

    /// Searches an order over `subset` and returns it in instance indices.
    pub fn optimize(&self, strategy: &Strategy, subset: &[usize]) -> Result<OptimizationResult> {
        check_order(subset, self.instance.len())?;

        let restricted = self.distances.restrict(subset);
        let oracle = CostOracle::new(&restricted);
        let rng = create_rng(self.config.seed);

        let mut result = match strategy {
            Strategy::Genetic(config) => GeneticAlgorithm::new(oracle, config.clone(), rng)?
                .with_quota(self.quota.clone())
                .optimize(),
            Strategy::Annealing(config) => SimulatedAnnealing::new(oracle, config.clone(), rng)?
                .with_quota(self.quota.clone())
                .optimize(),
            Strategy::NearestNeighbor => NearestNeighbor::new(oracle).optimize(),
        };

        result.best_order = result.best_order.iter().map(|&k| subset[k]).collect();
        debug!(
            "{}: {} points, cost {:.4}",
            strategy.name(),
            subset.len(),
            result.best_cost
        );
        Ok(result)
    }

    /// Optimizes `subset` with `strategy` and prices the resulting routes.
    pub fn plan(&self, strategy: &Strategy, subset: &[usize]) -> Result<Plan> {
        let result = self.optimize(strategy, subset)?;
        self.price(strategy.name(), result.best_order.clone(), Some(result))
    }

    /// Prices a given order without searching.
    pub fn plan_order(&self, label: &str, order: &[usize]) -> Result<Plan> {
        self.price(label, order.to_vec(), None)
    }

    /// The [`FIXED_ROUTE`] baseline followed by one plan per strategy.
    pub fn compare(&self, strategies: &[Strategy], subset: &[usize]) -> Result<Vec<Plan>> {
        let mut plans = Vec::with_capacity(strategies.len() + 1);
        plans.push(self.plan_order(FIXED_ROUTE, &fixed_order(subset))?);
        for strategy in strategies {
            plans.push(self.plan(strategy, subset)?);
        }

        for plan in &plans {
            debug!(
                "{}: {} routes, {:.2} km, cost {:.2}",
                plan.strategy, plan.summary.num_routes, plan.summary.distance_km, plan.summary.total_cost
            );
        }
        Ok(plans)
    }

    fn price(&self, label: &str, order: Vec<usize>, optimization: Option<OptimizationResult>) -> Result<Plan> {
        let routes = create_routes(&order, self.instance.points(), self.config.vehicle_capacity)?;
        let evaluator = RouteEvaluator::new(self.instance.points(), &self.distances, &self.config.cost_model)?;
        let route_metrics = evaluator.evaluate_all(&routes)?;
        let summary = FleetSummary::from_routes(&route_metrics);

        Ok(Plan {
            strategy: label.to_string(),
            order,
            routes,
            route_metrics,
            summary,
            optimization,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use std::time::Duration;

    fn instance() -> Instance {
        let depot = Location::new(20.2961, 85.8245);
        let spots = [
            (20.3520, 85.8140, 820.0),
            (20.2700, 85.8400, 310.0),
            (20.3100, 85.8600, 640.0),
            (20.2850, 85.7900, 150.0),
            (20.3300, 85.8000, 720.0),
            (20.2600, 85.8200, 480.0),
            (20.3050, 85.8350, 90.0),
        ];
        let points = spots
            .iter()
            .enumerate()
            .map(|(i, &(lat, lon, q))| DemandPoint::new(i, Location::new(lat, lon), q).with_capacity(1000.0))
            .collect();
        Instance::new(depot, points).expect("valid instance")
    }

    fn small_config() -> EngineConfig {
        EngineConfig::default()
            .with_vehicle_capacity(1500.0)
            .with_genetic(GeneticConfig::default().with_population_size(30).with_generations(40))
            .with_annealing(AnnealingConfig::default().with_cooling_rate(0.98))
    }

    fn is_permutation_of(order: &[usize], subset: &[usize]) -> bool {
        let mut a = order.to_vec();
        let mut b = subset.to_vec();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.vehicle_capacity, 10_000.0);
        assert_eq!(config.selection, SelectionConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_engine_config_rejects_bad_sections() {
        assert!(EngineConfig::default().with_vehicle_capacity(0.0).validate().is_err());
        assert!(EngineConfig::default()
            .with_selection(SelectionConfig::default().with_fill_threshold(-0.1))
            .validate()
            .is_err());
        assert!(EngineConfig::default()
            .with_annealing(AnnealingConfig::default().with_min_temp(0.0))
            .validate()
            .is_err());
        assert!(Planner::new(&instance(), EngineConfig::default().with_vehicle_capacity(-1.0)).is_err());
    }

    #[test]
    fn test_engine_config_partial_document() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"vehicle_capacity": 800, "genetic": {"generations": 10}}"#).expect("parses");
        assert_eq!(config.vehicle_capacity, 800.0);
        assert_eq!(config.genetic.generations, 10);
        assert_eq!(config.genetic.population_size, 100);
        assert_eq!(config.cost_model, CostModel::default());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json_str_validates() {
        assert!(EngineConfig::from_json_str(r#"{"seed": 3}"#).is_ok());
        assert!(matches!(
            EngineConfig::from_json_str(r#"{"vehicle_capacity": 0}"#),
            Err(RoutingError::InvalidConfiguration(_))
        ));
        assert!(EngineConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_select_by_fill_level() {
        let inst = instance();
        assert_eq!(select_for_collection(inst.points(), 0.4, 5), vec![0, 2, 4, 5]);
    }

    #[test]
    fn test_select_fallback_to_fullest() {
        let inst = instance();
        assert_eq!(select_for_collection(inst.points(), 0.9, 3), vec![0, 4, 2]);
    }

    #[test]
    fn test_select_without_capacity_uses_fallback() {
        let loc = Location::new(0.0, 0.0);
        let points = vec![
            DemandPoint::new(0, loc, 5.0),
            DemandPoint::new(1, loc, 9.0),
            DemandPoint::new(2, loc, 9.0),
        ];
        assert_eq!(select_for_collection(&points, 0.4, 5), vec![1, 2, 0]);
        assert!(select_for_collection(&[], 0.4, 5).is_empty());
    }

    #[test]
    fn test_demand_descending_order_is_stable() {
        let loc = Location::new(0.0, 0.0);
        let points = vec![
            DemandPoint::new(0, loc, 1.0),
            DemandPoint::new(1, loc, 3.0),
            DemandPoint::new(2, loc, 1.0),
            DemandPoint::new(3, loc, 2.0),
        ];
        assert_eq!(demand_descending_order(&points, &[2, 0, 1, 3]), vec![1, 3, 2, 0]);
        assert_eq!(fixed_order(&[2, 0, 1]), vec![2, 0, 1]);
    }

    #[test]
    fn test_optimize_maps_back_to_instance_indices() {
        let inst = instance();
        let planner = Planner::new(&inst, small_config()).expect("valid");
        let subset = [6, 1, 4, 3];
        for strategy in planner.config().strategies() {
            let result = planner.optimize(&strategy, &subset).expect("valid subset");
            assert!(is_permutation_of(&result.best_order, &subset), "{}", strategy.name());
            let full_cost = CostOracle::new(planner.distances()).cost(&result.best_order);
            assert!((result.best_cost - full_cost).abs() < 1e-9);
        }
    }

    #[test]
    fn test_optimize_rejects_bad_subset() {
        let inst = instance();
        let planner = Planner::new(&inst, small_config()).expect("valid");
        assert!(matches!(
            planner.optimize(&Strategy::NearestNeighbor, &[0, 9]),
            Err(RoutingError::IndexOutOfRange { index: 9, len: 7 })
        ));
        assert!(matches!(
            planner.optimize(&Strategy::NearestNeighbor, &[2, 2]),
            Err(RoutingError::DuplicateIndex(2))
        ));
    }

    #[test]
    fn test_plan_routes_respect_capacity() {
        let inst = instance();
        let planner = Planner::new(&inst, small_config()).expect("valid");
        let subset = planner.select();
        let plan = planner
            .plan(&Strategy::Genetic(planner.config().genetic.clone()), &subset)
            .expect("valid");

        assert_eq!(plan.strategy, "Genetic Algorithm");
        assert_eq!(plan.routes.concat(), plan.order);
        for route in &plan.routes {
            let load: f64 = route.iter().map(|&i| inst.points()[i].quantity()).sum();
            assert!(load <= 1500.0 || route.len() == 1);
        }
        assert_eq!(plan.route_metrics.len(), plan.routes.len());
        assert_eq!(plan.summary.num_routes, plan.routes.len());
        assert_eq!(plan.summary.bins_visited, subset.len());
        let optimization = plan.optimization.expect("searched plan");
        assert_eq!(optimization.best_order, plan.order);
        assert_eq!(optimization.history.len(), 40);
    }

    #[test]
    fn test_plan_is_reproducible() {
        let inst = instance();
        let planner = Planner::new(&inst, small_config()).expect("valid");
        let subset = planner.select();
        let strategy = Strategy::Annealing(planner.config().annealing.clone());
        let a = planner.plan(&strategy, &subset).expect("valid");
        let b = planner.plan(&strategy, &subset).expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_compare_baseline_first() {
        let inst = instance();
        let planner = Planner::new(&inst, small_config()).expect("valid");
        let subset = planner.select();
        let plans = planner.compare(&planner.config().strategies(), &subset).expect("valid");

        let names: Vec<&str> = plans.iter().map(|p| p.strategy.as_str()).collect();
        assert_eq!(
            names,
            vec![FIXED_ROUTE, "Nearest Neighbor", "Genetic Algorithm", "Simulated Annealing"]
        );
        assert_eq!(plans[0].order, subset);
        assert!(plans[0].optimization.is_none());
        for plan in &plans {
            assert_eq!(plan.summary.waste_kg, plans[0].summary.waste_kg);
        }
    }

    #[test]
    fn test_empty_and_single_subset() {
        let inst = instance();
        let planner = Planner::new(&inst, small_config()).expect("valid");

        let plan = planner.plan(&Strategy::NearestNeighbor, &[]).expect("valid");
        assert!(plan.order.is_empty());
        assert!(plan.routes.is_empty());
        assert_eq!(plan.summary, FleetSummary::default());

        let plan = planner
            .plan(&Strategy::Genetic(planner.config().genetic.clone()), &[3])
            .expect("valid");
        assert_eq!(plan.order, vec![3]);
        assert_eq!(plan.routes, vec![vec![3]]);
        let expected = 2.0 * planner.distances().get(0, 4);
        assert!((plan.optimization.expect("searched").best_cost - expected).abs() < 1e-12);
    }

    #[test]
    fn test_quota_passed_to_strategies() {
        let inst = instance();
        let planner = Planner::new(&inst, small_config())
            .expect("valid")
            .with_quota(Quota::default().with_time_limit(Duration::ZERO));
        let subset = [0, 1, 2, 3, 4];
        let result = planner
            .optimize(&Strategy::Genetic(planner.config().genetic.clone()), &subset)
            .expect("valid");
        assert!(result.stopped_early);
        assert!(is_permutation_of(&result.best_order, &subset));

        let nn = planner.optimize(&Strategy::NearestNeighbor, &subset).expect("valid");
        assert!(!nn.stopped_early);
    }

    #[test]
    fn test_plan_serializes() {
        let inst = instance();
        let planner = Planner::new(&inst, small_config()).expect("valid");
        let plan = planner.plan_order("Demand First", &[0, 4, 2]).expect("valid");
        let json = serde_json::to_value(&plan).expect("serializable");
        assert_eq!(json["strategy"], "Demand First");
        assert_eq!(json["summary"]["num_routes"], serde_json::json!(plan.routes.len()));
        assert!(json["optimization"].is_null());
    }
}
