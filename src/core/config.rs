//! Game configuration.
//!
//! A `GameConfig` controls the parts of a game that are not strategy
//! decisions: where randomness comes from, whether seat order is shuffled,
//! and an optional safety cap on the number of moves.

use serde::{Deserialize, Serialize};

/// Configuration for a single game.
///
/// ## Example
///
/// ```
/// use maexchen::core::GameConfig;
///
/// let config = GameConfig::new()
///     .with_seed(1234)
///     .without_shuffle()
///     .with_max_moves(500);
///
/// assert_eq!(config.seed, Some(1234));
/// assert!(!config.shuffle_players);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// RNG seed. `None` draws one from OS entropy (the game still reports it).
    pub seed: Option<u64>,

    /// Shuffle the seat order once during `init()`.
    pub shuffle_players: bool,

    /// Abort the game after this many moves. `None` for no cap.
    ///
    /// Claims strictly increase between eliminations, so a game always ends;
    /// the cap only guards against misbehaving custom strategies.
    pub max_moves: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            shuffle_players: true,
            max_moves: None,
        }
    }
}

impl GameConfig {
    /// Create a new game config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Keep the seat order as given.
    #[must_use]
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle_players = false;
        self
    }

    /// Set whether to shuffle the seat order.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_players = shuffle;
        self
    }

    /// Abort after `max` moves.
    #[must_use]
    pub fn with_max_moves(mut self, max: u32) -> Self {
        self.max_moves = Some(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.seed, None);
        assert!(config.shuffle_players);
        assert_eq!(config.max_moves, None);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_seed(7)
            .with_shuffle(false)
            .with_max_moves(10);

        assert_eq!(config.seed, Some(7));
        assert!(!config.shuffle_players);
        assert_eq!(config.max_moves, Some(10));
    }
}
