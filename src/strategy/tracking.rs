//! Opponent modeling by observed truthfulness.

use rustc_hash::FxHashMap;

use crate::core::{prob_ge, prob_lt, GameRng, PlayerId, Throw};
use crate::events::{EliminationReason, Event};

use super::{truth_or_next, Decision, Strategy, StrategyError};

/// Observed outcomes of an opponent's doubted claims.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Credibility {
    pub truths: u32,
    pub lies: u32,
}

impl Credibility {
    /// `truths / (truths + lies)`, or `None` without data.
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        let total = self.truths + self.lies;
        (total > 0).then(|| f64::from(self.truths) / f64::from(total))
    }
}

/// Tracks how often each opponent is caught lying or proven truthful, and
/// doubts a claim when a lie looks more likely than the truth.
///
/// The estimate combines the opponent's credibility with the chance that a
/// fair roll beats the claim before it:
///
/// ```text
/// P(lie)   = P(roll >= prev) * (1 - credibility) + P(roll < prev)
/// P(truth) = P(roll >= prev) * credibility
/// ```
#[derive(Clone, Debug)]
pub struct Tracking {
    me: Option<PlayerId>,
    stats: Option<FxHashMap<PlayerId, Credibility>>,
    last_claim: Option<Throw>,
    second_last_claim: Option<Throw>,
    last_player: Option<PlayerId>,
    credibility_level: f64,
}

impl Default for Tracking {
    fn default() -> Self {
        Self {
            me: None,
            stats: None,
            last_claim: None,
            second_last_claim: None,
            last_player: None,
            credibility_level: 0.5,
        }
    }
}

impl Tracking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credibility an opponent needs to be trusted on an opening claim.
    #[must_use]
    pub fn with_credibility_level(mut self, level: f64) -> Self {
        self.credibility_level = level;
        self
    }

    /// The two most recent claims, newest first.
    #[must_use]
    pub fn recent_claims(&self) -> (Option<Throw>, Option<Throw>) {
        (self.last_claim, self.second_last_claim)
    }

    /// Raw truth/lie counts for `player`.
    pub fn stats(&self, player: PlayerId) -> Result<Credibility, StrategyError> {
        self.stats
            .as_ref()
            .ok_or(StrategyError::NotInitialized)?
            .get(&player)
            .copied()
            .ok_or(StrategyError::UnknownPlayer(player))
    }

    /// `player`'s credibility, or `None` if nothing was observed yet.
    pub fn credibility(&self, player: PlayerId) -> Result<Option<f64>, StrategyError> {
        Ok(self.stats(player)?.ratio())
    }

    /// Whether anything has been observed about `player`.
    pub fn has_stats(&self, player: PlayerId) -> Result<bool, StrategyError> {
        Ok(self.credibility(player)?.is_some())
    }

    fn record(&mut self, player: PlayerId, truthful: bool) {
        let Some(entry) = self.stats.as_mut().and_then(|stats| stats.get_mut(&player)) else {
            log::trace!("Tracking: no table for {}", player);
            return;
        };
        if truthful {
            entry.truths += 1;
        } else {
            entry.lies += 1;
        }
    }

    fn forget_claims(&mut self) {
        self.last_claim = None;
        self.second_last_claim = None;
        self.last_player = None;
    }

    fn should_doubt(&self, claimed: Throw) -> Result<bool, StrategyError> {
        if claimed.is_maexchen() {
            return Ok(true);
        }
        let Some(player) = self.last_player else {
            return Ok(false);
        };
        let credibility = self.credibility(player)?;

        let Some(previous) = self.second_last_claim else {
            // Opening claim: nothing to beat, judge the player alone.
            return Ok(credibility.is_some_and(|c| c < self.credibility_level));
        };

        // Without observations the credibility level stands in as a prior.
        let c = credibility.unwrap_or(self.credibility_level);
        let p_lie = prob_ge(previous) * (1.0 - c) + prob_lt(previous);
        let p_truth = prob_ge(previous) * c;
        Ok(p_lie > p_truth)
    }
}

impl Strategy for Tracking {
    fn name(&self) -> &str {
        "Tracking"
    }

    fn listens_to_events(&self) -> bool {
        true
    }

    fn on_init(&mut self, me: PlayerId, roster: &[PlayerId]) {
        self.me = Some(me);
        self.stats = Some(
            roster
                .iter()
                .filter(|&&id| id != me)
                .map(|&id| (id, Credibility::default()))
                .collect(),
        );
    }

    fn on_event(&mut self, event: &Event) {
        match event {
            Event::Throw { player, stated, .. } => {
                self.second_last_claim = self.last_claim;
                self.last_claim = Some(*stated);
                self.last_player = Some(*player);
            }
            Event::Eliminated { player, reason } => {
                match reason {
                    EliminationReason::Lying if Some(*player) != self.me => self.record(*player, false),
                    EliminationReason::FalseAccusation => {
                        // The doubter was wrong, so the last claimant told the truth.
                        if let Some(claimant) = self.last_player.filter(|&p| Some(p) != self.me) {
                            self.record(claimant, true);
                        }
                    }
                    _ => {}
                }
                self.forget_claims();
            }
            Event::Finished { .. } | Event::Aborted { .. } => self.forget_claims(),
            _ => {}
        }
    }

    fn decide_doubt(&mut self, claimed: Throw, move_index: u32, _rng: &mut GameRng) -> Decision<bool> {
        match self.should_doubt(claimed) {
            Ok(doubt) => Decision::Answer(doubt),
            Err(e) => {
                log::warn!("Tracking cannot decide at move {}: {}", move_index, e);
                Decision::NoResponse
            }
        }
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
