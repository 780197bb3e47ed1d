//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Derive independent per-game generators from a batch seed
//! - **Explicit**: Passed by `&mut` to every strategy decision, never global
//!
//! ## Usage
//!
//! ```
//! use maexchen::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // Fork one generator per game in a batch
//! let mut game_rng = rng.fork();
//!
//! // Forks are deterministic - same parent seed, same fork sequence
//! let mut rng2 = GameRng::new(42);
//! let mut game_rng2 = rng2.fork();
//! assert_eq!(game_rng.roll_throw(), game_rng2.roll_throw());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::throw::Throw;

/// Deterministic RNG shared by the engine and the strategies of one game.
///
/// Uses ChaCha8 for speed while keeping a high-quality stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG with a seed drawn from OS entropy.
    ///
    /// The seed is still recorded, so the run can be replayed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Roll a single fair die.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    /// Roll two independent dice.
    pub fn roll_throw(&mut self) -> Throw {
        let (a, b) = (self.roll_die(), self.roll_die());
        // Both faces are in 1..=6, so every pair maps to a legal throw.
        match Throw::from_dice(a, b) {
            Ok(throw) => throw,
            Err(_) => unreachable!("die faces {} and {} out of range", a, b),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
