//! Seeded random number generation.
//!
//! Strategies take any [`rand::Rng`]; this module supplies the portable,
//! reproducible generator used by the planner and the tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator type returned by [`create_rng`].
pub type SeededRng = ChaCha8Rng;

/// Creates a generator whose stream depends only on `seed`.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_collect::random::create_rng;
///
/// let a: u64 = create_rng(7).random();
/// let b: u64 = create_rng(7).random();
/// assert_eq!(a, b);
/// ```
pub fn create_rng(seed: u64) -> SeededRng {
    ChaCha8Rng::seed_from_u64(seed)
}
