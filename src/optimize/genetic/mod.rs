//! Generational genetic algorithm over visiting orders.
//!
//! - [`Tour`] - permutation chromosome with cached cost
//! - [`operators`] - tournament selection, order crossover (OX), swap mutation
//! - [`GeneticAlgorithm`] - the generational loop with elitism

mod config;
pub mod operators;
mod tour;

use log::{debug, trace, warn};
use rand::Rng;

use crate::distance::CostOracle;
use crate::error::Result;

use super::{OptimizationResult, Optimizer, Quota, Snapshot};

pub use config::GeneticConfig;
pub use tour::Tour;

/// Genetic algorithm for the visiting order.
///
/// Runs exactly `generations` generations unless its [`Quota`] stops it
/// first. Each generation keeps the `elite_size` cheapest tours and fills the
/// rest with tournament-selected, crossed-over and mutated children.
///
/// # Examples
///
/// ```
/// use u_collect::distance::{CostOracle, DistanceMatrix};
/// use u_collect::models::Location;
/// use u_collect::optimize::{GeneticAlgorithm, GeneticConfig, Optimizer};
/// use u_collect::random::create_rng;
///
/// let dm = DistanceMatrix::build(
///     Location::new(0.0, 0.0),
///     &[Location::new(0.0, 1.0), Location::new(0.0, 2.0), Location::new(0.0, 3.0)],
/// );
/// let config = GeneticConfig::default()
///     .with_population_size(20)
///     .with_generations(30)
///     .with_elite_size(2);
/// let mut ga = GeneticAlgorithm::new(CostOracle::new(&dm), config, create_rng(42)).unwrap();
/// let result = ga.optimize();
/// assert_eq!(result.history.len(), 30);
/// assert_eq!(result.best_order.len(), 3);
/// ```
pub struct GeneticAlgorithm<'a, R: Rng> {
    oracle: CostOracle<'a>,
    config: GeneticConfig,
    rng: R,
    quota: Quota,
}

impl<'a, R: Rng> GeneticAlgorithm<'a, R> {
    /// Creates a GA after validating `config`.
    pub fn new(oracle: CostOracle<'a>, config: GeneticConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            oracle,
            config,
            rng,
            quota: Quota::default(),
        })
    }

    /// Attaches a deadline or cancellation quota.
    pub fn with_quota(mut self, quota: Quota) -> Self {
        self.quota = quota;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// A random order over every point.
    pub fn create_individual(&mut self) -> Tour {
        let genes = operators::random_permutation(self.oracle.num_points(), &mut self.rng);
        Tour::new(genes, &self.oracle)
    }

    /// Builds the next generation from a population sorted by cost.
    fn next_generation(&mut self, sorted: &[Tour]) -> Vec<Tour> {
        let size = self.config.population_size;
        let mut next: Vec<Tour> = sorted.iter().take(self.config.elite_size).cloned().collect();

        while next.len() < size {
            let p1 = operators::tournament(sorted, &mut self.rng);
            let p2 = operators::tournament(sorted, &mut self.rng);

            let (mut c1, mut c2) = if self.rng.random::<f64>() < self.config.crossover_rate {
                operators::order_crossover(p1.genes(), p2.genes(), &mut self.rng)
            } else {
                (p1.genes().to_vec(), p2.genes().to_vec())
            };

            operators::swap_mutation(&mut c1, self.config.mutation_rate, &mut self.rng);
            next.push(Tour::new(c1, &self.oracle));
            if next.len() < size {
                operators::swap_mutation(&mut c2, self.config.mutation_rate, &mut self.rng);
                next.push(Tour::new(c2, &self.oracle));
            }
        }

        next
    }
}

fn sort_by_cost(population: &mut [Tour]) {
    population.sort_by(|a, b| a.cost().total_cmp(&b.cost()));
}

impl<R: Rng> Optimizer for GeneticAlgorithm<'_, R> {
    fn name(&self) -> &'static str {
        "Genetic Algorithm"
    }

    fn optimize(&mut self) -> OptimizationResult {
        let n = self.oracle.num_points();
        if n < 2 {
            return OptimizationResult::trivial(&self.oracle);
        }

        debug!(
            "genetic algorithm: {} points, population {}, {} generations",
            n, self.config.population_size, self.config.generations
        );

        let mut population: Vec<Tour> = (0..self.config.population_size)
            .map(|_| self.create_individual())
            .collect();
        let mut history = Vec::with_capacity(self.config.generations);
        let mut stopped_early = false;
        sort_by_cost(&mut population);
        let mut best = population[0].clone();

        for generation in 0..self.config.generations {
            if self.quota.is_reached() {
                warn!("genetic algorithm stopped by quota after {generation} generations");
                stopped_early = true;
                break;
            }

            population = self.next_generation(&population);
            sort_by_cost(&mut population);

            let generation_best = &population[0];
            if generation_best.cost() < best.cost() {
                best = generation_best.clone();
            }
            trace!("generation {generation}: best {:.4}", generation_best.cost());
            history.push(Snapshot {
                iteration: generation,
                temperature: None,
                current_cost: generation_best.cost(),
                best_cost: best.cost(),
            });
        }

        debug!("genetic algorithm finished: best cost {:.4}", best.cost());

        OptimizationResult {
            best_cost: best.cost(),
            best_order: best.into_genes(),
            history,
            stopped_early,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Location;
    use crate::random::create_rng;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn grid(n: usize) -> DistanceMatrix {
        let points: Vec<Location> = (0..n)
            .map(|i| Location::new((i % 4) as f64 * 0.01, (i / 4) as f64 * 0.01 + 0.005))
            .collect();
        DistanceMatrix::build(Location::new(0.0, 0.0), &points)
    }

    fn small_config() -> GeneticConfig {
        GeneticConfig::default()
            .with_population_size(24)
            .with_generations(40)
            .with_elite_size(4)
    }

    fn is_permutation(order: &[usize], n: usize) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted == (0..n).collect::<Vec<_>>()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let dm = grid(4);
        let config = GeneticConfig::default().with_population_size(5).with_elite_size(6);
        assert!(GeneticAlgorithm::new(CostOracle::new(&dm), config, create_rng(1)).is_err());
    }

    #[test]
    fn test_create_individual() {
        let dm = grid(6);
        let mut ga = GeneticAlgorithm::new(CostOracle::new(&dm), small_config(), create_rng(42))
            .expect("valid config");
        let ind = ga.create_individual();
        assert!(is_permutation(ind.genes(), 6));
        assert!((ind.cost() - CostOracle::new(&dm).cost(ind.genes())).abs() < 1e-12);
    }

    #[test]
    fn test_returns_permutation_and_full_history() {
        let dm = grid(9);
        let oracle = CostOracle::new(&dm);
        let mut ga = GeneticAlgorithm::new(oracle, small_config(), create_rng(42)).expect("valid");
        let result = ga.optimize();
        assert!(is_permutation(&result.best_order, 9));
        assert_eq!(result.history.len(), 40);
        assert!(!result.stopped_early);
        assert!((result.best_cost - oracle.cost(&result.best_order)).abs() < 1e-12);
    }

    #[test]
    fn test_history_non_increasing() {
        let dm = grid(10);
        let mut ga = GeneticAlgorithm::new(CostOracle::new(&dm), small_config(), create_rng(3))
            .expect("valid");
        let result = ga.optimize();
        for pair in result.history.windows(2) {
            assert!(pair[1].current_cost <= pair[0].current_cost);
        }
        let last = result.history.last().expect("non-empty history");
        assert!((last.best_cost - result.best_cost).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_result() {
        let dm = grid(8);
        let run = |seed| {
            GeneticAlgorithm::new(CostOracle::new(&dm), small_config(), create_rng(seed))
                .expect("valid")
                .optimize()
        };
        let a = run(99);
        let b = run(99);
        assert_eq!(a.best_order, b.best_order);
        assert_eq!(a.best_cost.to_bits(), b.best_cost.to_bits());
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_finds_line_optimum() {
        // Points on a meridian: visiting them outward and back is optimal.
        let points: Vec<Location> = (1..=5).map(|i| Location::new(i as f64 * 0.01, 0.0)).collect();
        let dm = DistanceMatrix::build(Location::new(0.0, 0.0), &points);
        let oracle = CostOracle::new(&dm);
        let mut ga = GeneticAlgorithm::new(oracle, small_config(), create_rng(42)).expect("valid");
        let result = ga.optimize();
        let optimum = oracle.cost(&[0, 1, 2, 3, 4]);
        assert!((result.best_cost - optimum).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty = DistanceMatrix::build(Location::new(0.0, 0.0), &[]);
        let result = GeneticAlgorithm::new(CostOracle::new(&empty), small_config(), create_rng(1))
            .expect("valid")
            .optimize();
        assert!(result.best_order.is_empty());
        assert_eq!(result.best_cost, 0.0);
        assert!(result.history.is_empty());

        let single = DistanceMatrix::build(Location::new(0.0, 0.0), &[Location::new(0.0, 1.0)]);
        let result = GeneticAlgorithm::new(CostOracle::new(&single), small_config(), create_rng(1))
            .expect("valid")
            .optimize();
        assert_eq!(result.best_order, vec![0]);
        assert!((result.best_cost - 2.0 * single.get(0, 1)).abs() < 1e-12);
        assert!(result.history.is_empty());
    }

    #[test]
    fn test_without_elites_returns_best_seen() {
        let dm = grid(10);
        let oracle = CostOracle::new(&dm);
        let config = small_config().with_elite_size(0).with_mutation_rate(1.0);
        let result = GeneticAlgorithm::new(oracle, config, create_rng(11))
            .expect("valid")
            .optimize();
        let lowest = result
            .history
            .iter()
            .map(|s| s.best_cost)
            .fold(f64::INFINITY, f64::min);
        assert!(result.best_cost <= lowest);
        assert!((result.best_cost - oracle.cost(&result.best_order)).abs() < 1e-12);
        assert_eq!(result.best_cost, result.history.last().expect("non-empty").best_cost);
    }

    #[test]
    fn test_cancelled_quota_stops_immediately() {
        let dm = grid(6);
        let quota = Quota::default().with_cancel_flag(Arc::new(AtomicBool::new(true)));
        let result = GeneticAlgorithm::new(CostOracle::new(&dm), small_config(), create_rng(1))
            .expect("valid")
            .with_quota(quota)
            .optimize();
        assert!(result.stopped_early);
        assert!(result.history.is_empty());
        assert!(is_permutation(&result.best_order, 6));
    }
}
