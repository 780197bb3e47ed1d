//! # maexchen
//!
//! A simulation engine for the bluffing dice game Mäxchen (also known as
//! Meiern), built to compare automated strategies over many games.
//!
//! ## Design Principles
//!
//! 1. **Reproducible**: Every random decision (dice, seat shuffle, strategy
//!    randomness) draws from one explicitly passed [`GameRng`]. The same
//!    seed and roster give the same [`GameLog`], event for event.
//!
//! 2. **Fair**: Strategies only ever see the claimed value of another
//!    player's throw. The engine redacts the actual value before delivering
//!    an event.
//!
//! 3. **Robust**: A strategy that cannot answer is eliminated with
//!    [`EliminationReason::NoResponse`]; it never crashes the engine.
//!
//! ## Modules
//!
//! - `core`: Throws and their ranking, player ids, RNG, game configuration
//! - `events`: The closed event set and the round-grouped game log
//! - `strategy`: The `Strategy` trait and the built-in heuristics
//! - `rules`: Roster seating and the game state machine
//! - `evaluation`: Batch runner, aggregated results, text reports
//!
//! ## Example
//!
//! ```
//! use maexchen::{Evaluation, EvaluationConfig, Roster};
//! use maexchen::strategy::{AdvancedDummy, Dummy, Tracking};
//!
//! let mut roster = Roster::new();
//! roster.push(Box::new(Dummy::new()));
//! roster.push(Box::new(AdvancedDummy::new()));
//! roster.push(Box::new(Tracking::new()));
//!
//! let config = EvaluationConfig::new().with_repetitions(100).with_seed(2024);
//! let results = Evaluation::new(roster, config).run().unwrap();
//!
//! assert_eq!(results.total_wins(), 100);
//! println!("{}", results.summary(true));
//! ```

pub mod core;
pub mod events;
pub mod strategy;
pub mod rules;
pub mod evaluation;

// Re-export commonly used types
pub use crate::core::{
    prob_eq, prob_ge, prob_lt,
    GameConfig, GameRng, PlayerId,
    Throw, ThrowError, ThrowView, THROW_COUNT, THROW_VALUES,
};

pub use crate::events::{EliminationReason, Event, GameLog, Round, RosterEntry};

pub use crate::strategy::{Decision, Strategy, StrategyError, StrategyRegistry};

pub use crate::rules::{Game, GameError, GameStatus, Roster, Seat};

pub use crate::evaluation::{Evaluation, EvaluationConfig, EvaluationResults, PlayerRecord};
