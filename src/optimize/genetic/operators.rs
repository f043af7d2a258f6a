//! Selection, crossover and mutation on permutations of `0..n`.

use rand::seq::index;
use rand::seq::SliceRandom;
use rand::Rng;

use super::Tour;

/// Largest tournament drawn by [`tournament`].
pub const TOURNAMENT_SIZE: usize = 5;

/// A uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut genes: Vec<usize> = (0..n).collect();
    genes.shuffle(rng);
    genes
}

/// Tournament selection.
///
/// Draws `min(5, len)` distinct individuals and returns the cheapest; ties go
/// to the one drawn first.
///
/// # Panics
///
/// Panics if `population` is empty.
pub fn tournament<'p, R: Rng + ?Sized>(population: &'p [Tour], rng: &mut R) -> &'p Tour {
    let k = TOURNAMENT_SIZE.min(population.len());
    let picks = index::sample(rng, population.len(), k);
    let mut winner = &population[picks.index(0)];
    for i in picks.iter().skip(1) {
        if population[i].cost() < winner.cost() {
            winner = &population[i];
        }
    }
    winner
}

/// Order crossover (OX), producing `(OX(p1, p2), OX(p2, p1))`.
///
/// Two distinct cut points `start < end` are drawn. Each child keeps its first
/// parent's slice `[start, end)` in place; the remaining slots are written
/// from `end` onward, wrapping to 0, with the other parent's genes taken in
/// order from its beginning and skipping those already present.
///
/// Parents shorter than two genes are returned unchanged.
///
/// # Examples
///
/// ```
/// use u_collect::optimize::genetic::operators::order_crossover;
/// use u_collect::random::create_rng;
///
/// let mut rng = create_rng(3);
/// let (c1, c2) = order_crossover(&[0, 1, 2, 3, 4], &[4, 3, 2, 1, 0], &mut rng);
/// let mut sorted = c1.clone();
/// sorted.sort();
/// assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
/// assert_eq!(c2.len(), 5);
/// ```
pub fn order_crossover<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let size = parent1.len();
    if size < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let cuts = index::sample(rng, size, 2);
    let (a, b) = (cuts.index(0), cuts.index(1));
    let (start, end) = if a < b { (a, b) } else { (b, a) };

    (
        ox_child(parent1, parent2, start, end),
        ox_child(parent2, parent1, start, end),
    )
}

/// Builds one OX child with fixed cut points.
pub(crate) fn ox_child(keep: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let size = keep.len();
    let mut child = vec![usize::MAX; size];
    let mut placed = vec![false; size];

    for i in start..end {
        child[i] = keep[i];
        placed[keep[i]] = true;
    }

    let mut fill = end;
    for &gene in donor {
        if placed[gene] {
            continue;
        }
        if fill >= size {
            fill = 0;
        }
        child[fill] = gene;
        placed[gene] = true;
        fill += 1;
    }

    child
}

/// Swaps two distinct random positions with probability `rate`.
///
/// No-op for fewer than two genes.
pub fn swap_mutation<R: Rng + ?Sized>(genes: &mut [usize], rate: f64, rng: &mut R) {
    if genes.len() < 2 {
        return;
    }
    if rng.random::<f64>() < rate {
        let picks = index::sample(rng, genes.len(), 2);
        genes.swap(picks.index(0), picks.index(1));
    }
}
