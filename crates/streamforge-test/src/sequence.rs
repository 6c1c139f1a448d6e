//! Seeded sequences for order-equivalence tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Returns `len` integers in `-1000..1000`, reproducible for a given seed.
pub fn random_ints(seed: u64, len: usize) -> Vec<i32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-1000..1000)).collect()
}

/// Returns `count` sequence lengths in `0..=max_len`, reproducible for a
/// given seed.
pub fn random_lengths(seed: u64, count: usize, max_len: usize) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.random_range(0..=max_len)).collect()
}

/// A sort key tagged with its original position, for checking stability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ranked {
    pub key: i32,
    pub position: usize,
}

impl Ranked {
    /// Tags each key with its index.
    pub fn from_keys(keys: &[i32]) -> Vec<Ranked> {
        keys.iter()
            .enumerate()
            .map(|(position, &key)| Ranked { key, position })
            .collect()
    }
}
