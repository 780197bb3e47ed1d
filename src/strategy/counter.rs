//! Strategies that listen to the event stream to exploit predictable opponents.

use rustc_hash::FxHashMap;

use crate::core::{GameRng, PlayerId, Throw, THROW_COUNT};
use crate::events::Event;

use super::{truth_or_next, Decision, Strategy, StrategyError};

/// Exploits [`Dummy`](super::Dummy): a claim exactly one rank above the one
/// before it is most likely a forced lie, so it gets doubted.
///
/// When forced to lie itself it claims 66, leaving the next player only
/// Mäxchen, which the player after that will probably doubt.
#[derive(Clone, Debug, Default)]
pub struct CounterDummy {
    last_claim: Option<Throw>,
    second_last_claim: Option<Throw>,
}

impl CounterDummy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for CounterDummy {
    fn name(&self) -> &str {
        "CounterDummy"
    }

    fn listens_to_events(&self) -> bool {
        true
    }

    fn on_event(&mut self, event: &Event) {
        match event {
            Event::Throw { stated, .. } => {
                self.second_last_claim = self.last_claim;
                self.last_claim = Some(*stated);
            }
            Event::Eliminated { .. } | Event::Finished { .. } | Event::Aborted { .. } => {
                self.last_claim = None;
                self.second_last_claim = None;
            }
            _ => {}
        }
    }

    fn decide_doubt(&mut self, claimed: Throw, _move_index: u32, _rng: &mut GameRng) -> Decision<bool> {
        let dummy_pattern = self
            .second_last_claim
            .and_then(|before| before.checked_add(1).ok())
            .is_some_and(|next| next == claimed);
        Decision::Answer(claimed.is_maexchen() || dummy_pattern)
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
                let top_double = Throw::MAEXCHEN.checked_sub(1).unwrap_or(Throw::MAEXCHEN);
                Decision::Answer(if top_double > pending { top_double } else { Throw::MAEXCHEN })
            }
            _ => Decision::Answer(actual),
        }
    }
}

/// Exploits [`Threshold`](super::Threshold) players.
///
/// Counts how often every opponent claims each throw. An opponent who claims
/// one throw far more often than any other is assumed to be a threshold
/// player, and that claim is doubted whenever they make it.
#[derive(Clone, Debug)]
pub struct CounterThreshold {
    me: Option<PlayerId>,
    claim_counts: Option<FxHashMap<PlayerId, [u32; THROW_COUNT]>>,
    last_player: Option<PlayerId>,
    min_data_points: u32,
    frequency_threshold: f64,
}

impl Default for CounterThreshold {
    fn default() -> Self {
        Self {
            me: None,
            claim_counts: None,
            last_player: None,
            min_data_points: 5,
            frequency_threshold: 0.5,
        }
    }
}

impl CounterThreshold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims to observe before guessing an opponent's threshold.
    #[must_use]
    pub fn with_min_data_points(mut self, points: u32) -> Self {
        self.min_data_points = points;
        self
    }

    /// Share of claims the most frequent one must exceed.
    #[must_use]
    pub fn with_frequency_threshold(mut self, threshold: f64) -> Self {
        self.frequency_threshold = threshold;
        self
    }

    fn counts(&self, player: PlayerId) -> Result<&[u32; THROW_COUNT], StrategyError> {
        self.claim_counts
            .as_ref()
            .ok_or(StrategyError::NotInitialized)?
            .get(&player)
            .ok_or(StrategyError::UnknownPlayer(player))
    }

    /// Number of claims observed from `player`.
    pub fn total_tracked(&self, player: PlayerId) -> Result<u32, StrategyError> {
        Ok(self.counts(player)?.iter().sum())
    }

    /// The throw(s) `player` claimed most often.
    pub fn most_frequent(&self, player: PlayerId) -> Result<Vec<Throw>, StrategyError> {
        let counts = self.counts(player)?;
        let max = counts.iter().copied().max().unwrap_or(0);
        Ok(Throw::all().filter(|throw| counts[throw.rank()] == max).collect())
    }

    /// Share of `player`'s claims taken by their most frequent one (0 if none).
    pub fn most_frequent_share(&self, player: PlayerId) -> Result<f64, StrategyError> {
        let total = self.total_tracked(player)?;
        if total == 0 {
            return Ok(0.0);
        }
        let max = self.counts(player)?.iter().copied().max().unwrap_or(0);
        Ok(f64::from(max) / f64::from(total))
    }

    /// The claim `player` is suspected to always make, if the data is conclusive.
    pub fn suspected_threshold(&self, player: PlayerId) -> Result<Option<Throw>, StrategyError> {
        if self.total_tracked(player)? <= self.min_data_points
            || self.most_frequent_share(player)? <= self.frequency_threshold
        {
            return Ok(None);
        }
        let candidates = self.most_frequent(player)?;
        Ok(match candidates.as_slice() {
            [only] => Some(*only),
            _ => None,
        })
    }

    fn should_doubt(&self, claimed: Throw) -> Result<bool, StrategyError> {
        if claimed.is_maexchen() {
            return Ok(true);
        }
        match self.last_player {
            Some(player) => Ok(self.suspected_threshold(player)? == Some(claimed)),
            None => Ok(false),
        }
    }
}

impl Strategy for CounterThreshold {
    fn name(&self) -> &str {
        "CounterThreshold"
    }

    fn listens_to_events(&self) -> bool {
        true
    }

    fn on_init(&mut self, me: PlayerId, roster: &[PlayerId]) {
        self.me = Some(me);
        self.claim_counts = Some(
            roster
                .iter()
                .filter(|&&id| id != me)
                .map(|&id| (id, [0; THROW_COUNT]))
                .collect(),
        );
    }

    fn on_event(&mut self, event: &Event) {
        match event {
            Event::Throw { player, stated, .. } if Some(*player) != self.me => {
                match self.claim_counts.as_mut().and_then(|counts| counts.get_mut(player)) {
                    Some(counts) => counts[stated.rank()] += 1,
                    None => log::trace!("CounterThreshold: untracked claim by {}", player),
                }
                self.last_player = Some(*player);
            }
            Event::Eliminated { .. } | Event::Finished { .. } | Event::Aborted { .. } => {
                self.last_player = None;
            }
            _ => {}
        }
    }

    fn decide_doubt(&mut self, claimed: Throw, move_index: u32, _rng: &mut GameRng) -> Decision<bool> {
        match self.should_doubt(claimed) {
            Ok(doubt) => Decision::Answer(doubt),
            Err(e) => {
                log::warn!("CounterThreshold cannot decide at move {}: {}", move_index, e);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ThrowView;

    fn t(value: u8) -> Throw {
        Throw::new(value).unwrap()
    }

    fn claim(player: u32, stated: u8) -> Event {
        Event::Throw { player: PlayerId(player), actual: ThrowView::Hidden, stated: t(stated) }
    }

    #[test]
    fn test_counter_dummy_spots_one_rank_steps() {
        let mut player = CounterDummy::new();
        let mut rng = GameRng::new(0);
        player.on_event(&claim(0, 42));
        player.on_event(&claim(1, 43));
        assert_eq!(player.decide_doubt(t(43), 2, &mut rng), Decision::Answer(true));
        assert_eq!(player.decide_doubt(t(51), 2, &mut rng), Decision::Answer(false));
    }

    #[test]
    fn test_counter_dummy_forgets_after_elimination() {
        let mut player = CounterDummy::new();
        let mut rng = GameRng::new(0);
        player.on_event(&claim(0, 42));
        player.on_event(&claim(1, 43));
        player.on_event(&Event::Eliminated {
            player: PlayerId(1),
            reason: crate::events::EliminationReason::Lying,
        });
        assert_eq!(player.decide_doubt(t(43), 3, &mut rng), Decision::Answer(false));
    }

    #[test]
    fn test_counter_dummy_forced_lie_is_66() {
        let mut player = CounterDummy::new();
        let mut rng = GameRng::new(0);
        assert_eq!(player.decide_claim(t(31), Some(t(54)), 0, &mut rng), Decision::Answer(t(66)));
        assert_eq!(player.decide_claim(t(31), Some(t(66)), 0, &mut rng), Decision::Answer(t(21)));
        assert_eq!(player.decide_claim(t(55), Some(t(54)), 0, &mut rng), Decision::Answer(t(55)));
    }

    #[test]
    fn test_counter_threshold_requires_init() {
        let player = CounterThreshold::new();
        assert_eq!(player.total_tracked(PlayerId(0)), Err(StrategyError::NotInitialized));
        assert_eq!(player.most_frequent_share(PlayerId(0)), Err(StrategyError::NotInitialized));
    }

    #[test]
    fn test_counter_threshold_uninitialized_does_not_answer() {
        let mut player = CounterThreshold::new();
        let mut rng = GameRng::new(0);
        player.on_event(&claim(0, 61));
        assert_eq!(player.decide_doubt(t(61), 1, &mut rng), Decision::NoResponse);
    }

    #[test]
    fn test_counter_threshold_tables_exclude_self() {
        let mut player = CounterThreshold::new();
        let roster = [PlayerId(0), PlayerId(1), PlayerId(2)];
        player.on_init(PlayerId(0), &roster);

        assert_eq!(player.total_tracked(PlayerId(1)), Ok(0));
        assert_eq!(player.total_tracked(PlayerId(0)), Err(StrategyError::UnknownPlayer(PlayerId(0))));
        assert_eq!(player.most_frequent_share(PlayerId(2)), Ok(0.0));
    }

    #[test]
    fn test_counter_threshold_detects_threshold_player() {
        let mut player = CounterThreshold::new();
        let mut rng = GameRng::new(0);
        player.on_init(PlayerId(0), &[PlayerId(0), PlayerId(1)]);

        for _ in 0..6 {
            player.on_event(&claim(1, 61));
        }
        player.on_event(&claim(1, 33));

        assert_eq!(player.total_tracked(PlayerId(1)), Ok(7));
        assert_eq!(player.suspected_threshold(PlayerId(1)), Ok(Some(t(61))));
        assert_eq!(player.decide_doubt(t(61), 7, &mut rng), Decision::Answer(true));
        assert_eq!(player.decide_doubt(t(62), 7, &mut rng), Decision::Answer(false));
    }

    #[test]
    fn test_counter_threshold_no_assumption_with_few_points() {
        let mut player = CounterThreshold::new();
        player.on_init(PlayerId(0), &[PlayerId(0), PlayerId(1)]);
        for _ in 0..5 {
            player.on_event(&claim(1, 61));
        }
        assert_eq!(player.suspected_threshold(PlayerId(1)), Ok(None));
    }

    #[test]
    fn test_counter_threshold_ignores_own_claims() {
        let mut player = CounterThreshold::new();
        player.on_init(PlayerId(0), &[PlayerId(0), PlayerId(1)]);
        player.on_event(&claim(0, 61));
        assert_eq!(player.total_tracked(PlayerId(1)), Ok(0));
    }
}
