//! Deterministic random number generation for training runs.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical training runs
//! - **Explicit**: Passed by `&mut` to every consumer, never global
//!
//! ```
//! use nim_rl::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! assert_eq!(a.choose(&[1, 2, 3]), b.choose(&[1, 2, 3]));
//! assert_eq!(a.gaussian_noise(9, 0.5), b.gaussian_noise(9, 0.5));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Seeded RNG passed explicitly to everything that needs randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Draw one sample from the standard normal distribution.
    fn standard_normal(&mut self) -> f64 {
        self.inner.sample(StandardNormal)
    }

    /// Fill a vector of `len` independent normal samples multiplied by `scale`.
    pub fn gaussian_noise(&mut self, len: usize, scale: f64) -> Vec<f64> {
        (0..len).map(|_| self.standard_normal() * scale).collect()
    }
}
