//! Fixed-threshold strategy.

use crate::core::{GameRng, Throw};

use super::{Decision, Strategy};

/// Doubts any claim at or above `doubt_threshold`. When its own roll beats
/// the pending claim but does not exceed `lie_threshold`, it announces
/// `lie_threshold` instead, so it never claims anything below that.
#[derive(Clone, Debug)]
pub struct Threshold {
    doubt_threshold: Throw,
    lie_threshold: Throw,
}

impl Default for Threshold {
    fn default() -> Self {
        let sixty_one = Throw::new(61).unwrap_or(Throw::LOWEST);
        Self {
            doubt_threshold: sixty_one,
            lie_threshold: sixty_one,
        }
    }
}

impl Threshold {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_doubt_threshold(mut self, threshold: Throw) -> Self {
        self.doubt_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_lie_threshold(mut self, threshold: Throw) -> Self {
        self.lie_threshold = threshold;
        self
    }

    #[must_use]
    pub fn doubt_threshold(&self) -> Throw {
        self.doubt_threshold
    }

    #[must_use]
    pub fn lie_threshold(&self) -> Throw {
        self.lie_threshold
    }
}

impl Strategy for Threshold {
    fn name(&self) -> &str {
        "Threshold"
    }

    fn decide_doubt(&mut self, claimed: Throw, _move_index: u32, _rng: &mut GameRng) -> Decision<bool> {
        Decision::Answer(claimed >= self.doubt_threshold)
    }

    fn decide_claim(
        &mut self,
        actual: Throw,
        pending: Option<Throw>,
        _move_index: u32,
        _rng: &mut GameRng,
    ) -> Decision<Throw> {
        match pending {
            Some(pending) if actual <= pending => {
                Decision::Answer(pending.checked_add(1).unwrap_or(Throw::MAEXCHEN))
            }
            _ if actual <= self.lie_threshold => Decision::Answer(self.lie_threshold),
            _ => Decision::Answer(actual),
        }
    }
}
