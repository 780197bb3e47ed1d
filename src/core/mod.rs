//! Core value types: throws, players, RNG, configuration.
//!
//! Everything here is independent of the game rules and of any strategy.

pub mod throw;
pub mod player;
pub mod rng;
pub mod config;

pub use throw::{prob_eq, prob_ge, prob_lt, Throw, ThrowError, ThrowView, THROW_COUNT, THROW_VALUES};
pub use player::PlayerId;
pub use rng::GameRng;
pub use config::GameConfig;
