//! Bounded draws over the caller-seeded random stream.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

/// Uniform index in `0..bound`. `bound` must be non-zero.
pub(super) fn index_below(rng: &mut ChaCha8Rng, bound: usize) -> usize {
    debug_assert!(bound > 0);
    (rng.next_u64() % bound as u64) as usize
}

/// Uniform value in `min..=max`.
pub(super) fn range_inclusive(rng: &mut ChaCha8Rng, min: usize, max: usize) -> usize {
    debug_assert!(min <= max);
    min + index_below(rng, max - min + 1)
}
