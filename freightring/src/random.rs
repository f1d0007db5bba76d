//! Uniform random source abstraction.
//!
//! The simulation consumes randomness through the narrow [`RandomSource`]
//! trait so production code draws from OS entropy while reproducible runs
//! and tests inject a seeded generator. Sources are owned by a single
//! thread at a time, so the trait requires `Send` but not `Sync`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniformly distributed integers.
pub trait RandomSource: Send {
    /// Returns a uniformly distributed integer in `[lower, upper]`, both
    /// bounds inclusive. Draws are independent.
    ///
    /// Callers must pass `lower <= upper`.
    fn generate(&mut self, lower: u32, upper: u32) -> u32;
}

/// Entropy-seeded source for production runs.
///
/// Wraps [`StdRng`] rather than the thread-local rng so the source can be
/// handed to a spawned thread.
#[derive(Debug)]
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    /// Creates a source seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn generate(&mut self, lower: u32, upper: u32) -> u32 {
        self.rng.gen_range(lower..=upper)
    }
}

/// Deterministic source for reproducible runs and tests.
///
/// ChaCha keeps the stream stable across platforms and releases, so a
/// seed reproduces the same simulation everywhere.
#[derive(Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Creates a source producing the stream identified by `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn generate(&mut self, lower: u32, upper: u32) -> u32 {
        self.rng.gen_range(lower..=upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_stay_within_inclusive_bounds() {
        let mut source = SeededRandom::from_seed(7);
        for _ in 0..200 {
            let value = source.generate(2, 5);
            assert!((2..=5).contains(&value));
        }
    }

    #[test]
    fn test_degenerate_range_returns_the_bound() {
        let mut source = SeededRandom::from_seed(1);
        assert_eq!(source.generate(9, 9), 9);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SeededRandom::from_seed(1234);
        let mut b = SeededRandom::from_seed(1234);
        for _ in 0..50 {
            assert_eq!(a.generate(0, 1000), b.generate(0, 1000));
        }
    }

    #[test]
    fn test_system_random_stays_within_bounds() {
        let mut source = SystemRandom::new();
        for _ in 0..100 {
            let value = source.generate(0, 3);
            assert!(value <= 3);
        }
    }

    #[test]
    fn test_sources_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SystemRandom>();
        assert_send::<SeededRandom>();
    }
}
