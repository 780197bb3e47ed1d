//! Baseline strategies that only lie when forced to.

use crate::core::{GameRng, Throw};

use super::{truth_or_next, Decision, Strategy};

/// Trusts every claim except Mäxchen; lies only when its roll doesn't beat
/// the pending claim, and then by the smallest possible margin.
#[derive(Clone, Debug, Default)]
pub struct Dummy;

impl Dummy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for Dummy {
    fn name(&self) -> &str {
        "Dummy"
    }

    fn decide_doubt(&mut self, claimed: Throw, _move_index: u32, _rng: &mut GameRng) -> Decision<bool> {
        Decision::Answer(claimed.is_maexchen())
    }

    fn decide_claim(
        &mut self,
        actual: Throw,
        pending: Option<Throw>,
        _move_index: u32,
        _rng: &mut GameRng,
    ) -> Decision<Throw> {
        Decision::Answer(truth_or_next(actual, pending))
    }
}

/// Like [`Dummy`], but also doubts 66, and when forced to lie picks a random
/// claim above the pending one (short of Mäxchen) instead of the next rank.
#[derive(Clone, Debug, Default)]
pub struct AdvancedDummy;

impl AdvancedDummy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for AdvancedDummy {
    fn name(&self) -> &str {
        "AdvancedDummy"
    }

    fn decide_doubt(&mut self, claimed: Throw, _move_index: u32, _rng: &mut GameRng) -> Decision<bool> {
        let top_double = Throw::MAEXCHEN.checked_sub(1).ok();
        Decision::Answer(claimed.is_maexchen() || Some(claimed) == top_double)
    }

    fn decide_claim(
        &mut self,
        actual: Throw,
        pending: Option<Throw>,
        _move_index: u32,
        rng: &mut GameRng,
    ) -> Decision<Throw> {
        let pending = match pending {
            Some(pending) if actual <= pending => pending,
            _ => return Decision::Answer(actual),
        };
        // Ranks strictly between the pending claim and Mäxchen.
        let lowest = pending.rank() + 1;
        if lowest >= Throw::MAEXCHEN.rank() {
            return Decision::Answer(Throw::MAEXCHEN);
        }
        let rank = rng.gen_range_usize(lowest..Throw::MAEXCHEN.rank());
        Decision::from(Throw::from_rank(rank).ok())
    }
}
