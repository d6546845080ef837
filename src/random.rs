//! Random number generator construction.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the generator that drives a whole run.
///
/// The same seed always yields the same stream.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from a fresh random seed when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    create_rng(seed.unwrap_or_else(rand::random))
}
