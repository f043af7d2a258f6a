//! Visiting-order search strategies.
//!
//! Every strategy implements [`Optimizer`]: it prices candidate orders with a
//! [`CostOracle`] and returns the best order found.
//!
//! - [`GeneticAlgorithm`] - generational GA with tournament selection, OX
//!   crossover, swap mutation and elitism
//! - [`SimulatedAnnealing`] - swap-neighborhood annealing with geometric
//!   cooling and Metropolis acceptance
//! - [`NearestNeighbor`] - deterministic greedy construction, O(n²)
//!
//! Problems with fewer than two points have only one order; all strategies
//! return it immediately with an empty history.

mod annealing;
pub mod genetic;
mod nearest_neighbor;
mod quota;

use serde::Serialize;

use crate::distance::CostOracle;

pub use annealing::{AnnealingConfig, SimulatedAnnealing};
pub use genetic::{GeneticAlgorithm, GeneticConfig};
pub use nearest_neighbor::NearestNeighbor;
pub use quota::Quota;

/// One progress record of an iterative strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    /// Generation (GA) or iteration (SA) index.
    pub iteration: usize,
    /// Annealing temperature; `None` for the GA.
    pub temperature: Option<f64>,
    /// Cost of the current solution (SA) or of the generation's best (GA).
    pub current_cost: f64,
    /// Best cost seen so far.
    pub best_cost: f64,
}

/// Outcome of a single optimization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    /// Best visiting order, a permutation of the active point indices.
    pub best_order: Vec<usize>,
    /// Round-trip cost of `best_order` in kilometers.
    pub best_cost: f64,
    /// Convergence trace; empty for constructive strategies.
    pub history: Vec<Snapshot>,
    /// `true` if a [`Quota`] ended the run before its own stopping rule.
    pub stopped_early: bool,
}

impl OptimizationResult {
    /// The identity order for problems too small to search.
    pub(crate) fn trivial(oracle: &CostOracle<'_>) -> Self {
        let best_order: Vec<usize> = (0..oracle.num_points()).collect();
        let best_cost = oracle.cost(&best_order);
        Self {
            best_order,
            best_cost,
            history: Vec::new(),
            stopped_early: false,
        }
    }

    /// Best cost recorded at each history entry.
    pub fn best_costs(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.best_cost).collect()
    }
}

/// A strategy that searches for a low-cost visiting order.
///
/// Strategies are built fresh for each request and own their random
/// generator, so independent runs share no mutable state.
pub trait Optimizer {
    /// Short human-readable strategy name.
    fn name(&self) -> &'static str;

    /// Runs the search to completion (or until its quota is reached).
    fn optimize(&mut self) -> OptimizationResult;
}
