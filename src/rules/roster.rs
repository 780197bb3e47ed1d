//! Seating of strategies.
//!
//! A [`Roster`] is an ordered list of [`Seat`]s. Each seat pairs a strategy
//! with a [`PlayerId`] that is unique within the roster and stays fixed for
//! the roster's lifetime.

use crate::core::{GameRng, PlayerId};
use crate::events::RosterEntry;
use crate::strategy::Strategy;

use super::game::GameError;

/// One participant: an id and the strategy making its decisions.
///
/// The strategy can be swapped in place, the id cannot:
///
/// ```compile_fail
/// use maexchen::core::PlayerId;
/// use maexchen::rules::Roster;
/// use maexchen::strategy::Dummy;
///
/// let mut roster = Roster::new();
/// roster.push(Box::new(Dummy::new()));
/// roster.seats_mut()[0].id = PlayerId(7);
/// ```
#[derive(Clone, Debug)]
pub struct Seat {
    id: PlayerId,
    pub strategy: Box<dyn Strategy>,
}

impl Seat {
    #[must_use]
    pub fn new(id: PlayerId, strategy: Box<dyn Strategy>) -> Self {
        Self { id, strategy }
    }

    /// Fixed once seated; the roster keeps ids unique.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Snapshot for a game log.
    #[must_use]
    pub fn entry(&self) -> RosterEntry {
        RosterEntry {
            id: self.id,
            name: self.strategy.name().to_string(),
        }
    }
}

/// Ordered participants of a game or evaluation batch.
///
/// ## Example
///
/// ```
/// use maexchen::rules::Roster;
/// use maexchen::strategy::{Dummy, Threshold};
/// use maexchen::core::PlayerId;
///
/// let mut roster = Roster::new();
/// let a = roster.push(Box::new(Dummy::new()));
/// let b = roster.push(Box::new(Threshold::new()));
///
/// assert_eq!((a, b), (PlayerId(0), PlayerId(1)));
/// assert!(roster.push_with_id(PlayerId(1), Box::new(Dummy::new())).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Roster {
    seats: Vec<Seat>,
}

impl Roster {
    /// Create a new empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a strategy under the lowest unused id.
    pub fn push(&mut self, strategy: Box<dyn Strategy>) -> PlayerId {
        let id = (0..)
            .map(PlayerId)
            .find(|id| !self.contains(*id))
            .unwrap_or(PlayerId(u32::MAX));
        self.seats.push(Seat::new(id, strategy));
        id
    }

    /// Seat a strategy under a chosen id.
    pub fn push_with_id(&mut self, id: PlayerId, strategy: Box<dyn Strategy>) -> Result<(), GameError> {
        if self.contains(id) {
            return Err(GameError::DuplicatePlayerId(id));
        }
        self.seats.push(Seat::new(id, strategy));
        Ok(())
    }

    /// Check if a player id is seated.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.seats.iter().any(|seat| seat.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seats_mut(&mut self) -> &mut [Seat] {
        &mut self.seats
    }

    /// Find the seat of `id`.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.id == id)
    }

    /// All ids in seat order.
    #[must_use]
    pub fn ids(&self) -> Vec<PlayerId> {
        self.seats.iter().map(|seat| seat.id).collect()
    }

    /// Snapshot of ids and names in seat order.
    #[must_use]
    pub fn entries(&self) -> Vec<RosterEntry> {
        self.seats.iter().map(Seat::entry).collect()
    }

    /// Shuffle the seat order.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.seats);
    }

    /// Call `on_init` on every strategy with the full id list.
    pub fn init_strategies(&mut self) {
        let ids = self.ids();
        for seat in &mut self.seats {
            seat.strategy.on_init(seat.id, &ids);
        }
    }

    /// Deep copy: every strategy is cloned, ids are kept.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        self.clone()
    }
}

impl FromIterator<Box<dyn Strategy>> for Roster {
    fn from_iter<I: IntoIterator<Item = Box<dyn Strategy>>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for strategy in iter {
            roster.push(strategy);
        }
        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Throw, ThrowView};
    use crate::events::Event;
    use crate::strategy::{CounterThreshold, Dummy, ShowOff};

    #[test]
    fn test_push_assigns_lowest_unused_id() {
        let mut roster = Roster::new();
        roster.push_with_id(PlayerId(0), Box::new(Dummy::new())).unwrap();
        roster.push_with_id(PlayerId(2), Box::new(Dummy::new())).unwrap();

        assert_eq!(roster.push(Box::new(ShowOff::new())), PlayerId(1));
        assert_eq!(roster.push(Box::new(ShowOff::new())), PlayerId(3));
        assert_eq!(roster.ids(), vec![PlayerId(0), PlayerId(2), PlayerId(1), PlayerId(3)]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut roster = Roster::new();
        roster.push(Box::new(Dummy::new()));
        assert_eq!(
            roster.push_with_id(PlayerId(0), Box::new(Dummy::new())),
            Err(GameError::DuplicatePlayerId(PlayerId(0)))
        );
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_entries_snapshot_names() {
        let roster: Roster = vec![Box::new(Dummy::new()) as Box<dyn Strategy>, Box::new(ShowOff::new())]
            .into_iter()
            .collect();
        let entries = roster.entries();
        assert_eq!(entries[0].name, "Dummy");
        assert_eq!(entries[1].name, "ShowOff");
        assert_eq!(entries[1].id, PlayerId(1));
    }

    #[test]
    fn test_init_strategies_reaches_every_seat() {
        let mut roster = Roster::new();
        for _ in 0..3 {
            roster.push(Box::new(CounterThreshold::new()));
        }
        roster.init_strategies();

        // Each seat has tables for the others, so it can judge their claims.
        let mut rng = GameRng::new(0);
        let claim = Throw::new(42).unwrap();
        for seat in roster.seats_mut() {
            let other = PlayerId((seat.id().raw() + 1) % 3);
            seat.strategy.on_event(&Event::Throw { player: other, actual: ThrowView::Hidden, stated: claim });
            assert!(!seat.strategy.decide_doubt(claim, 1, &mut rng).is_no_response());
        }
    }

    #[test]
    fn test_seats_mut_keeps_ids_unique() {
        let mut roster = Roster::new();
        roster.push(Box::new(Dummy::new()));
        roster.push(Box::new(Dummy::new()));
        for seat in roster.seats_mut() {
            seat.strategy = Box::new(ShowOff::new());
        }

        assert_eq!(roster.ids(), vec![PlayerId(0), PlayerId(1)]);
        assert!(roster.seats().iter().all(|seat| seat.strategy.name() == "ShowOff"));
        assert_eq!(roster.push(Box::new(Dummy::new())), PlayerId(2));
    }

    #[test]
    fn test_shuffle_keeps_ids() {
        let mut roster = Roster::new();
        for _ in 0..6 {
            roster.push(Box::new(Dummy::new()));
        }
        roster.shuffle(&mut GameRng::new(9));
        let mut ids = roster.ids();
        ids.sort();
        assert_eq!(ids, (0..6).map(PlayerId).collect::<Vec<_>>());
    }
}
