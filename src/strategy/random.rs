//! Strategies whose claims are drawn at random.

use crate::core::{GameRng, Throw};

use super::{random_from, Decision, Strategy};

/// Doubts with a fixed probability and claims a uniformly random throw.
///
/// Its claims often fail to beat the pending one; it exists as a noise floor
/// for comparisons.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    doubt_chance: f64,
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self { doubt_chance: 0.5 }
    }
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the probability of doubting, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_doubt_chance(mut self, chance: f64) -> Self {
        self.doubt_chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
        self
    }

    #[must_use]
    pub fn doubt_chance(&self) -> f64 {
        self.doubt_chance
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "Random"
    }

    fn decide_doubt(&mut self, _claimed: Throw, _move_index: u32, rng: &mut GameRng) -> Decision<bool> {
        Decision::Answer(rng.gen_bool(self.doubt_chance))
    }

    fn decide_claim(
        &mut self,
        _actual: Throw,
        _pending: Option<Throw>,
        _move_index: u32,
        rng: &mut GameRng,
    ) -> Decision<Throw> {
        Decision::Answer(random_from(0, rng))
    }
}

/// Always announces a double or Mäxchen, whatever it rolled.
/// Doubts only Mäxchen.
#[derive(Clone, Debug, Default)]
pub struct ShowOff;

impl ShowOff {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for ShowOff {
    fn name(&self) -> &str {
        "ShowOff"
    }

    fn decide_doubt(&mut self, claimed: Throw, _move_index: u32, _rng: &mut GameRng) -> Decision<bool> {
        Decision::Answer(claimed.is_maexchen())
    }

    fn decide_claim(
        &mut self,
        _actual: Throw,
        pending: Option<Throw>,
        _move_index: u32,
        rng: &mut GameRng,
    ) -> Decision<Throw> {
        let lowest_double = Throw::all().position(Throw::is_double).unwrap_or(0);
        let lowest = match pending {
            Some(pending) => lowest_double.max(pending.rank() + 1),
            None => lowest_double,
        };
        Decision::Answer(random_from(lowest, rng))
    }
}
