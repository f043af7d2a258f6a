//! Simulated annealing over visiting orders.

use log::{debug, trace, warn};
use rand::seq::index;
use rand::Rng;
use serde::Deserialize;

use crate::distance::CostOracle;
use crate::error::{Result, RoutingError};

use super::genetic::operators::random_permutation;
use super::{OptimizationResult, Optimizer, Quota, Snapshot};

/// Iterations between history snapshots.
pub const SNAPSHOT_INTERVAL: usize = 100;

/// Parameters of [`SimulatedAnnealing`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Starting temperature.
    pub initial_temp: f64,
    /// Multiplicative decay applied after every iteration.
    pub cooling_rate: f64,
    /// The run ends once the temperature is no longer above this.
    pub min_temp: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temp: 10_000.0,
            cooling_rate: 0.995,
            min_temp: 1.0,
        }
    }
}

impl AnnealingConfig {
    /// Sets the starting temperature.
    pub fn with_initial_temp(mut self, initial_temp: f64) -> Self {
        self.initial_temp = initial_temp;
        self
    }

    /// Sets the cooling rate.
    pub fn with_cooling_rate(mut self, cooling_rate: f64) -> Self {
        self.cooling_rate = cooling_rate;
        self
    }

    /// Sets the stopping temperature.
    pub fn with_min_temp(mut self, min_temp: f64) -> Self {
        self.min_temp = min_temp;
        self
    }

    /// Requires a positive finite floor, a finite start and a cooling rate in
    /// (0, 1) so the loop always terminates.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_temp.is_finite() && self.min_temp > 0.0) {
            return Err(RoutingError::InvalidConfiguration(format!(
                "min_temp must be positive, got {}",
                self.min_temp
            )));
        }
        if !self.initial_temp.is_finite() {
            return Err(RoutingError::InvalidConfiguration(format!(
                "initial_temp must be finite, got {}",
                self.initial_temp
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(RoutingError::InvalidConfiguration(format!(
                "cooling_rate must be within (0, 1), got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }
}

/// Simulated annealing with a two-position swap neighborhood.
///
/// Improving neighbors are always accepted; worse ones with probability
/// `exp((current - new) / temperature)`. The temperature decays
/// geometrically until it reaches `min_temp`.
///
/// # Examples
///
/// ```
/// use u_collect::distance::{CostOracle, DistanceMatrix};
/// use u_collect::models::Location;
/// use u_collect::optimize::{AnnealingConfig, Optimizer, SimulatedAnnealing};
/// use u_collect::random::create_rng;
///
/// let dm = DistanceMatrix::build(
///     Location::new(0.0, 0.0),
///     &[Location::new(0.0, 1.0), Location::new(1.0, 1.0), Location::new(1.0, 0.0)],
/// );
/// let mut sa = SimulatedAnnealing::new(CostOracle::new(&dm), AnnealingConfig::default(), create_rng(7)).unwrap();
/// let result = sa.optimize();
/// assert_eq!(result.best_order.len(), 3);
/// assert_eq!(result.history[0].iteration, 0);
/// ```
pub struct SimulatedAnnealing<'a, R: Rng> {
    oracle: CostOracle<'a>,
    config: AnnealingConfig,
    rng: R,
    quota: Quota,
}

impl<'a, R: Rng> SimulatedAnnealing<'a, R> {
    /// Creates an annealer after validating `config`.
    pub fn new(oracle: CostOracle<'a>, config: AnnealingConfig, rng: R) -> Result<Self> {
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

    /// Metropolis criterion. `temperature` is always above `min_temp > 0`.
    fn accept(&mut self, current_cost: f64, new_cost: f64, temperature: f64) -> bool {
        if new_cost < current_cost {
            return true;
        }
        ((current_cost - new_cost) / temperature).exp() > self.rng.random::<f64>()
    }
}

impl<R: Rng> Optimizer for SimulatedAnnealing<'_, R> {
    fn name(&self) -> &'static str {
        "Simulated Annealing"
    }

    fn optimize(&mut self) -> OptimizationResult {
        let n = self.oracle.num_points();
        if n < 2 {
            return OptimizationResult::trivial(&self.oracle);
        }

        debug!(
            "simulated annealing: {} points, temperature {} -> {} at rate {}",
            n, self.config.initial_temp, self.config.min_temp, self.config.cooling_rate
        );

        let mut current = random_permutation(n, &mut self.rng);
        let mut current_cost = self.oracle.cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut neighbor = current.clone();

        let mut temperature = self.config.initial_temp;
        let mut iteration = 0;
        let mut history = Vec::new();
        let mut stopped_early = false;

        while temperature > self.config.min_temp {
            if self.quota.is_reached() {
                warn!("simulated annealing stopped by quota after {iteration} iterations");
                stopped_early = true;
                break;
            }

            neighbor.copy_from_slice(&current);
            let picks = index::sample(&mut self.rng, n, 2);
            neighbor.swap(picks.index(0), picks.index(1));
            let new_cost = self.oracle.cost(&neighbor);

            if self.accept(current_cost, new_cost, temperature) {
                std::mem::swap(&mut current, &mut neighbor);
                current_cost = new_cost;
                if current_cost < best_cost {
                    best.copy_from_slice(&current);
                    best_cost = current_cost;
                }
            }

            if iteration % SNAPSHOT_INTERVAL == 0 {
                trace!("iteration {iteration}: T={temperature:.3} current {current_cost:.4} best {best_cost:.4}");
                history.push(Snapshot {
                    iteration,
                    temperature: Some(temperature),
                    current_cost,
                    best_cost,
                });
            }

            temperature *= self.config.cooling_rate;
            iteration += 1;
        }

        debug!("simulated annealing finished after {iteration} iterations: best cost {best_cost:.4}");

        OptimizationResult {
            best_order: best,
            best_cost,
            history,
            stopped_early,
        }
    }
}
