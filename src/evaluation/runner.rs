//! Batch runner: plays many games with one roster and aggregates results.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, GameRng};
use crate::rules::{Game, GameError, Roster};

use super::results::EvaluationResults;

/// Configuration for an evaluation batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of games to play.
    pub repetitions: u32,

    /// Batch seed. Every game's seed is forked from it, so one seed
    /// reproduces the whole batch. `None` draws one from OS entropy.
    pub seed: Option<u64>,

    /// Shuffle seat order at the start of every game.
    pub shuffle_players: bool,

    /// Give every game a fresh copy of the strategies instead of letting
    /// their state carry over from game to game.
    pub isolate_repetitions: bool,

    /// Per-game move cap, see [`GameConfig::max_moves`].
    pub max_moves: Option<u32>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            repetitions: 100,
            seed: None,
            shuffle_players: true,
            isolate_repetitions: false,
            max_moves: None,
        }
    }
}

impl EvaluationConfig {
    /// Create a new evaluation config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of games.
    #[must_use]
    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Set the batch seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable seat shuffling.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_players = shuffle;
        self
    }

    /// Enable or disable per-game strategy copies.
    #[must_use]
    pub fn with_isolation(mut self, isolate: bool) -> Self {
        self.isolate_repetitions = isolate;
        self
    }

    /// Set the per-game move cap.
    #[must_use]
    pub fn with_max_moves(mut self, max: u32) -> Self {
        self.max_moves = Some(max);
        self
    }
}

/// Plays a batch of games.
///
/// The caller's roster is never touched: [`Evaluation::run`] copies it on
/// entry and calls `on_init` on the copies once. The copies are then shared
/// by every game (their state persists between games) unless
/// [`EvaluationConfig::isolate_repetitions`] is set.
///
/// ## Example
///
/// ```
/// use maexchen::evaluation::{Evaluation, EvaluationConfig};
/// use maexchen::rules::Roster;
/// use maexchen::strategy::{Dummy, Threshold};
///
/// let mut roster = Roster::new();
/// roster.push(Box::new(Dummy::new()));
/// roster.push(Box::new(Threshold::new()));
///
/// let config = EvaluationConfig::new().with_repetitions(20).with_seed(1);
/// let mut evaluation = Evaluation::new(roster, config);
/// let results = evaluation.run().unwrap();
///
/// assert_eq!(results.repetitions(), 20);
/// assert_eq!(results.total_wins() + results.aborted(), 20);
/// ```
#[derive(Debug)]
pub struct Evaluation {
    roster: Roster,
    config: EvaluationConfig,
    played: Option<Roster>,
}

impl Evaluation {
    #[must_use]
    pub fn new(roster: Roster, config: EvaluationConfig) -> Self {
        Self {
            roster,
            config,
            played: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// The roster as handed in.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The strategies as they left the last run.
    #[must_use]
    pub fn played(&self) -> Option<&Roster> {
        self.played.as_ref()
    }

    /// Play the batch.
    pub fn run(&mut self) -> Result<EvaluationResults, GameError> {
        self.run_with_progress(|_, _| {})
    }

    /// Play the batch, calling `progress(done, total)` after every game.
    ///
    /// Fails with [`GameError::TooFewPlayers`] before playing anything if the
    /// roster has fewer than two seats.
    pub fn run_with_progress<F>(&mut self, mut progress: F) -> Result<EvaluationResults, GameError>
    where
        F: FnMut(u32, u32),
    {
        let count = self.roster.len();
        if count < 2 {
            return Err(GameError::TooFewPlayers { count });
        }

        let total = self.config.repetitions;
        let mut batch_rng = self.config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        log::info!(
            "Evaluating {} players over {} games (seed {})",
            count,
            total,
            batch_rng.seed()
        );

        let mut snapshot = self.roster.duplicate();
        snapshot.init_strategies();
        let mut results = EvaluationResults::new(&snapshot.entries());
        let mut last: Option<Roster> = None;

        for done in 1..=total {
            let roster = match last.take() {
                Some(roster) if !self.config.isolate_repetitions => roster,
                _ => snapshot.duplicate(),
            };
            let game_config = GameConfig {
                seed: Some(batch_rng.fork().seed()),
                shuffle_players: self.config.shuffle_players,
                max_moves: self.config.max_moves,
            };

            let mut game = Game::new(roster, game_config);
            if let Err(e) = game.run() {
                log::warn!("Game {} of {} failed: {}", done, total, e);
            }
            results.record(game.log(), game.move_count());

            last = Some(game.into_roster());
            progress(done, total);
        }

        self.played = Some(last.unwrap_or(snapshot));
        log::info!(
            "Evaluation done: {} games, {} aborted",
            results.repetitions(),
            results.aborted()
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Dummy, RandomStrategy};

    fn roster(n: usize) -> Roster {
        (0..n)
            .map(|_| Box::new(RandomStrategy::new()) as Box<dyn crate::strategy::Strategy>)
            .collect()
    }

    #[test]
    fn test_too_few_players_fails_up_front() {
        let mut evaluation = Evaluation::new(roster(1), EvaluationConfig::new().with_seed(0));
        let mut calls = 0;
        let result = evaluation.run_with_progress(|_, _| calls += 1);
        assert_eq!(result, Err(GameError::TooFewPlayers { count: 1 }));
        assert_eq!(calls, 0);
        assert!(evaluation.played().is_none());
    }

    #[test]
    fn test_every_game_has_one_winner() {
        let config = EvaluationConfig::new().with_repetitions(200).with_seed(42);
        let results = Evaluation::new(roster(3), config).run().unwrap();
        assert_eq!(results.repetitions(), 200);
        assert_eq!(results.aborted(), 0);
        assert_eq!(results.total_wins(), 200);
    }

    #[test]
    fn test_progress_reports_each_game() {
        let config = EvaluationConfig::new().with_repetitions(5).with_seed(1);
        let mut seen = Vec::new();
        Evaluation::new(roster(2), config)
            .run_with_progress(|done, total| seen.push((done, total)))
            .unwrap();
        assert_eq!(seen, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
    }

    #[test]
    fn test_batch_is_reproducible() {
        let config = EvaluationConfig::new().with_repetitions(50).with_seed(99);
        let a = Evaluation::new(roster(4), config.clone()).run().unwrap();
        let b = Evaluation::new(roster(4), config).run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_repetitions() {
        let mut dummies = Roster::new();
        dummies.push(Box::new(Dummy::new()));
        dummies.push(Box::new(Dummy::new()));
        let results = Evaluation::new(dummies, EvaluationConfig::new().with_repetitions(0))
            .run()
            .unwrap();
        assert_eq!(results.repetitions(), 0);
        assert_eq!(results.win_rate(crate::core::PlayerId(0)), 0.0);
    }
}
