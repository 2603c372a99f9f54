//! Deterministic RNG wrapper for the optimizer.
//!
//! # Determinism strategy
//!
//! The genetic search draws every random decision from one `SmallRng`
//! seeded from the configuration.  Parallel fitness evaluation never touches
//! the RNG; only the sequential population-update step does.  A given seed
//! reproduces the same run regardless of thread count.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG used by the search strategies.
///
/// Used only in single-threaded contexts.  If a worker needs its own stream,
/// derive one with [`child`](Self::child).
pub struct SearchRng(SmallRng);

impl SearchRng {
    pub fn new(seed: u64) -> Self {
        SearchRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SearchRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SearchRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SearchRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice; `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// Two distinct indices in `0..n`.  Returns `None` when `n < 2`.
    pub fn distinct_pair(&mut self, n: usize) -> Option<(usize, usize)> {
        if n < 2 {
            return None;
        }
        let a = self.0.gen_range(0..n);
        let mut b = self.0.gen_range(0..n - 1);
        if b >= a {
            b += 1;
        }
        Some((a, b))
    }
}
