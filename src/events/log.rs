//! Append-only game log.
//!
//! A `GameLog` groups events into rounds (one round per `Game::move()` call)
//! and keeps a snapshot of the roster taken when the game was created, so
//! later changes to live strategy objects cannot alter the record.
//!
//! Two logs are equal iff their rosters, round counts, and every event in
//! every round are equal. Seeded games are checked for reproducibility
//! with exactly this comparison.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

use super::event::Event;

/// Events of one move. A move emits at most four events
/// (doubt, elimination, throw, terminal marker).
pub type Round = SmallVec<[Event; 4]>;

/// Snapshot of one seat at game creation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: PlayerId,
    pub name: String,
}

impl std::fmt::Display for RosterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} with id {}", self.name, self.id.raw())
    }
}

/// Ordered record of everything that happened in one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    roster: Vec<RosterEntry>,
    rounds: Vec<Round>,
    winner: Option<PlayerId>,
}

impl GameLog {
    /// Create an empty log for the given roster.
    #[must_use]
    pub fn new(roster: Vec<RosterEntry>) -> Self {
        Self {
            roster,
            rounds: Vec::new(),
            winner: None,
        }
    }

    /// Append an event to the current round, opening one if none exists.
    pub fn happen(&mut self, event: Event) {
        if let Event::Finished { winner } = event {
            self.winner = Some(winner);
        }
        match self.rounds.last_mut() {
            Some(round) => round.push(event),
            None => {
                let mut round = Round::new();
                round.push(event);
                self.rounds.push(round);
            }
        }
    }

    /// Open a new, empty round.
    pub fn new_round(&mut self) {
        self.rounds.push(Round::new());
    }

    /// Whether the game this log records has ended.
    ///
    /// True iff the last event of the last non-empty round is a Finished or
    /// Aborted marker. An empty log has not finished.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.rounds
            .iter()
            .rev()
            .find_map(|round| round.last())
            .is_some_and(Event::is_terminal)
    }

    /// Roster snapshot taken at game creation.
    #[must_use]
    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    /// The winner, once a Finished event has been logged.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// All rounds in order.
    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Number of rounds (including empty ones).
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Iterate over all events in order, ignoring round boundaries.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.rounds.iter().flatten()
    }

    /// The final event, if any.
    #[must_use]
    pub fn last_event(&self) -> Option<&Event> {
        self.events().last()
    }

    /// Human-readable lines: roster header, one line per event, and a note
    /// if the game is still running.
    #[must_use]
    pub fn pretty_lines(&self) -> Vec<String> {
        let players = if self.roster.len() == 1 { "player" } else { "players" };
        let mut lines = vec![format!(
            "=== Game initialized with {} {}: ===",
            self.roster.len(),
            players
        )];
        lines.extend(self.roster.iter().map(|entry| format!(" - {}", entry)));
        for (i, round) in self.rounds.iter().enumerate() {
            lines.extend(round.iter().map(|event| format!("[Round {}] {}", i, event)));
        }
        if !self.has_finished() {
            lines.push("(Game is still ongoing)".to_string());
        }
        lines
    }

    /// [`GameLog::pretty_lines`] joined with newlines.
    #[must_use]
    pub fn pretty(&self) -> String {
        self.pretty_lines().join("\n")
    }

    /// Compact binary snapshot for replay and offline analysis.
    ///
    /// The byte format is not stable across versions.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore a log from [`GameLog::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
