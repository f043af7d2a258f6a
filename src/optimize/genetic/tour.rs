//! Permutation chromosome with a cached round-trip cost.

use crate::distance::CostOracle;

/// A visiting order together with its cost.
///
/// The cost is computed once when the tour is created, so sorting and
/// tournaments never re-price an individual.
///
/// # Examples
///
/// ```
/// use u_collect::distance::{CostOracle, DistanceMatrix};
/// use u_collect::optimize::genetic::Tour;
///
/// let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0]).unwrap();
/// let tour = Tour::new(vec![1, 0], &CostOracle::new(&dm));
/// assert_eq!(tour.genes(), &[1, 0]);
/// assert_eq!(tour.cost(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct Tour {
    genes: Vec<usize>,
    cost: f64,
}

impl Tour {
    /// Prices `genes` with the oracle and wraps them.
    pub fn new(genes: Vec<usize>, oracle: &CostOracle<'_>) -> Self {
        let cost = oracle.cost(&genes);
        Self { genes, cost }
    }

    /// The visiting order.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Round-trip cost of this order.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns the number of points in this tour.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns true if the tour visits no points.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Consumes the tour, returning its order.
    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }
}
