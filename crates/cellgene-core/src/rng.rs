use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Derive the seed for the `index`-th of several independent worlds sharing a
/// base seed, so their streams do not overlap.
pub fn derive_world_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(index as u64 * crate::constants::RNG_DERIVATION_PRIME)
}
