//! Seeded random number generation.
//!
//! Every stochastic call site in the crate takes an explicit `&mut R: Rng`.
//! There is no global generator; a run is reproducible from its seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
