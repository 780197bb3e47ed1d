//! Pluggable decision-making for players.
//!
//! A [`Strategy`] answers the two questions the engine asks on every turn:
//!
//! 1. **Doubt?** Asked only when there is a pending claim to challenge.
//! 2. **Claim?** Given its own actual roll (and the pending claim, if any),
//!    what does the player announce?
//!
//! Both calls receive the move index and the game's [`GameRng`], so any
//! randomized decision is reproducible from the game seed. A strategy that
//! cannot answer returns [`Decision::NoResponse`] and is eliminated; it
//! never crashes the engine.
//!
//! Strategies that set [`Strategy::listens_to_events`] receive every event
//! through [`Strategy::on_event`], with other players' actual rolls hidden.
//!
//! ## Built-in strategies
//!
//! - [`Dummy`], [`AdvancedDummy`]: lie only when forced
//! - [`ShowOff`], [`RandomStrategy`]: random claims
//! - [`Threshold`]: fixed doubt/lie thresholds
//! - [`CounterDummy`], [`CounterThreshold`]: exploit the above
//! - [`Tracking`]: models each opponent's credibility

pub mod dummy;
pub mod random;
pub mod threshold;
pub mod counter;
pub mod tracking;
pub mod registry;

pub use counter::{CounterDummy, CounterThreshold};
pub use dummy::{AdvancedDummy, Dummy};
pub use random::{RandomStrategy, ShowOff};
pub use registry::StrategyRegistry;
pub use threshold::Threshold;
pub use tracking::Tracking;

use crate::core::{GameRng, PlayerId, Throw};
use crate::events::Event;

/// A strategy's answer, or the lack of one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision<T> {
    Answer(T),
    NoResponse,
}

impl<T> Decision<T> {
    /// The answer, if one was given.
    pub fn answer(self) -> Option<T> {
        match self {
            Decision::Answer(value) => Some(value),
            Decision::NoResponse => None,
        }
    }

    #[must_use]
    pub fn is_no_response(&self) -> bool {
        matches!(self, Decision::NoResponse)
    }
}

impl<T> From<Option<T>> for Decision<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Decision::NoResponse, Decision::Answer)
    }
}

/// Errors from reading a strategy's private statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrategyError {
    /// `on_init` has not been called yet.
    NotInitialized,
    /// No statistics exist for this player.
    UnknownPlayer(PlayerId),
}

impl std::fmt::Display for StrategyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyError::NotInitialized => write!(f, "strategy statistics read before on_init"),
            StrategyError::UnknownPlayer(id) => write!(f, "no statistics for {}", id),
        }
    }
}

impl std::error::Error for StrategyError {}

/// Decision-making unit for one seat.
///
/// ## Implementation Notes
///
/// - `decide_doubt` is never called without a pending claim
/// - `decide_claim` must return a legal throw; the engine rejects claims
///   that do not rank strictly above the pending one
/// - Use only the supplied `rng` for randomness
pub trait Strategy: StrategyClone + std::fmt::Debug {
    /// Display name, used in logs and result tables.
    fn name(&self) -> &str;

    /// Whether the engine should deliver events to `on_event`.
    fn listens_to_events(&self) -> bool {
        false
    }

    /// Called once per evaluation batch, before any game is played.
    ///
    /// `me` is this strategy's seat id, `roster` all ids in the batch.
    fn on_init(&mut self, me: PlayerId, roster: &[PlayerId]) {
        let _ = (me, roster);
    }

    /// Called once per event, in emission order, if subscribed.
    fn on_event(&mut self, event: &Event) {
        let _ = event;
    }

    /// Does this player doubt the pending `claimed` throw?
    fn decide_doubt(&mut self, claimed: Throw, move_index: u32, rng: &mut GameRng) -> Decision<bool>;

    /// What does this player announce after rolling `actual`?
    fn decide_claim(
        &mut self,
        actual: Throw,
        pending: Option<Throw>,
        move_index: u32,
        rng: &mut GameRng,
    ) -> Decision<Throw>;
}

/// Object-safe cloning for boxed strategies.
pub trait StrategyClone {
    fn box_clone(&self) -> Box<dyn Strategy>;
}

impl<T: Strategy + Clone + 'static> StrategyClone for T {
    fn box_clone(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Strategy> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Tell the truth if it beats the pending claim, otherwise claim one rank above it.
///
/// Above Mäxchen there is nothing left; Mäxchen is claimed again and the
/// engine rejects it as not beating the predecessor.
#[must_use]
pub fn truth_or_next(actual: Throw, pending: Option<Throw>) -> Throw {
    match pending {
        None => actual,
        Some(pending) if actual > pending => actual,
        Some(pending) => pending.checked_add(1).unwrap_or(Throw::MAEXCHEN),
    }
}

/// A uniformly random throw with rank in `lowest..=Mäxchen`.
pub(crate) fn random_from(lowest: usize, rng: &mut GameRng) -> Throw {
    let rank = rng.gen_range_usize(lowest.min(Throw::MAEXCHEN.rank())..Throw::MAEXCHEN.rank() + 1);
    Throw::from_rank(rank).unwrap_or(Throw::MAEXCHEN)
}
