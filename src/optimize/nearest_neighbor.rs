//! Nearest-neighbor constructive ordering.
//!
//! Starting from the depot, always move to the closest unvisited point.
//! O(n²) in the number of points, with no randomness, so it serves as the
//! repeatable reference order in strategy comparisons.

use log::debug;

use crate::distance::CostOracle;

use super::{OptimizationResult, Optimizer};

/// Greedy nearest-neighbor ordering.
///
/// Ties are broken in favor of the lower point index, so identical inputs
/// always produce identical orders.
///
/// # Examples
///
/// ```
/// use u_collect::distance::{CostOracle, DistanceMatrix};
/// use u_collect::models::Location;
/// use u_collect::optimize::{NearestNeighbor, Optimizer};
///
/// let dm = DistanceMatrix::build(
///     Location::new(0.0, 0.0),
///     &[Location::new(0.0, 3.0), Location::new(0.0, 1.0), Location::new(0.0, 2.0)],
/// );
/// let result = NearestNeighbor::new(CostOracle::new(&dm)).optimize();
/// assert_eq!(result.best_order, vec![1, 2, 0]);
/// assert!(result.history.is_empty());
/// ```
pub struct NearestNeighbor<'a> {
    oracle: CostOracle<'a>,
}

impl<'a> NearestNeighbor<'a> {
    /// Creates the heuristic over the oracle's matrix.
    pub fn new(oracle: CostOracle<'a>) -> Self {
        Self { oracle }
    }
}

impl Optimizer for NearestNeighbor<'_> {
    fn name(&self) -> &'static str {
        "Nearest Neighbor"
    }

    fn optimize(&mut self) -> OptimizationResult {
        let n = self.oracle.num_points();
        if n < 2 {
            return OptimizationResult::trivial(&self.oracle);
        }

        let distances = self.oracle.distances();
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        // matrix index; 0 is the depot
        let mut current = 0;

        for _ in 0..n {
            let mut best: Option<(usize, f64)> = None;
            for (i, _) in visited.iter().enumerate().filter(|&(_, &v)| !v) {
                let d = distances.get(current, i + 1);
                match best {
                    Some((_, best_d)) if d >= best_d => {}
                    _ => best = Some((i, d)),
                }
            }
            let Some((next, _)) = best else { break };
            visited[next] = true;
            order.push(next);
            current = next + 1;
        }

        let best_cost = self.oracle.cost(&order);
        debug!("nearest neighbor: {n} points, cost {best_cost:.4}");

        OptimizationResult {
            best_order: order,
            best_cost,
            history: Vec::new(),
            stopped_early: false,
        }
    }
}
