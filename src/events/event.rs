//! Game events.
//!
//! Every decision the engine processes is recorded as an [`Event`].
//! Events are a closed set: a claimed throw, a doubt, an elimination, and
//! the two terminal markers (finished, aborted).
//!
//! ## Hidden information
//!
//! The engine's own log keeps the actual value of every throw. Before an
//! event is shown to a strategy it passes through [`Event::redacted_for`],
//! which replaces the actual throw with [`ThrowView::Hidden`] unless the
//! viewer made the claim.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Throw, ThrowView};

/// Why a player was removed from the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliminationReason {
    /// Their claim was doubted and it was a lie.
    Lying,
    /// They doubted a claim that was true.
    FalseAccusation,
    /// Their claim did not rank strictly above the pending one.
    FailedToBeatPredecessor,
    /// Their strategy did not answer.
    NoResponse,
}

impl EliminationReason {
    /// All reasons, in a fixed order used for tables.
    pub const ALL: [EliminationReason; 4] = [
        EliminationReason::Lying,
        EliminationReason::FalseAccusation,
        EliminationReason::FailedToBeatPredecessor,
        EliminationReason::NoResponse,
    ];

    /// Position in [`EliminationReason::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            EliminationReason::Lying => 0,
            EliminationReason::FalseAccusation => 1,
            EliminationReason::FailedToBeatPredecessor => 2,
            EliminationReason::NoResponse => 3,
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            EliminationReason::Lying => "Lying",
            EliminationReason::FalseAccusation => "Making a false accusation",
            EliminationReason::FailedToBeatPredecessor => "Failing to beat their predecessor's result",
            EliminationReason::NoResponse => "Player didn't respond",
        }
    }

    /// Short column label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            EliminationReason::Lying => "lying",
            EliminationReason::FalseAccusation => "false accusation",
            EliminationReason::FailedToBeatPredecessor => "not beaten",
            EliminationReason::NoResponse => "no response",
        }
    }
}

impl std::fmt::Display for EliminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Something that happened during a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A player rolled and announced a result.
    Throw {
        player: PlayerId,
        /// What was actually rolled (hidden from other observers).
        actual: ThrowView,
        /// What the player claimed.
        stated: Throw,
    },
    /// A player doubted their predecessor's claim.
    Doubt { player: PlayerId },
    /// A player was removed from the game.
    Eliminated { player: PlayerId, reason: EliminationReason },
    /// The game ended regularly.
    Finished { winner: PlayerId },
    /// The game ended irregularly.
    Aborted { reason: String },
}

impl Event {
    /// Create a throw event with a known actual value.
    #[must_use]
    pub fn throw(player: PlayerId, actual: Throw, stated: Throw) -> Self {
        Event::Throw {
            player,
            actual: ThrowView::Known(actual),
            stated,
        }
    }

    /// Create an abort event.
    #[must_use]
    pub fn aborted(reason: impl Into<String>) -> Self {
        Event::Aborted { reason: reason.into() }
    }

    /// The player this event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Event::Throw { player, .. } | Event::Doubt { player } | Event::Eliminated { player, .. } => {
                Some(*player)
            }
            Event::Finished { winner } => Some(*winner),
            Event::Aborted { .. } => None,
        }
    }

    /// Is this a game-over marker?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Finished { .. } | Event::Aborted { .. })
    }

    /// Whether a throw claim was truthful.
    ///
    /// `None` for non-throw events and for claims whose actual value is hidden.
    #[must_use]
    pub fn is_truthful(&self) -> Option<bool> {
        match self {
            Event::Throw { actual, stated, .. } => actual.throw().ok().map(|a| a == *stated),
            _ => None,
        }
    }

    /// The copy of this event that `viewer` is allowed to see.
    #[must_use]
    pub fn redacted_for(&self, viewer: PlayerId) -> Event {
        match self {
            Event::Throw { player, stated, .. } if *player != viewer => Event::Throw {
                player: *player,
                actual: ThrowView::Hidden,
                stated: *stated,
            },
            other => other.clone(),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Throw { player, actual: ThrowView::Known(actual), stated } => {
                write!(f, "{} threw {}, states they threw {}", player, actual, stated)
            }
            Event::Throw { player, actual: ThrowView::Hidden, stated } => {
                write!(f, "{} states they threw {}", player, stated)
            }
            Event::Doubt { player } => write!(f, "{} chose to doubt their predecessor", player),
            Event::Eliminated { player, reason } => write!(f, "{} was removed. Reason: {}", player, reason),
            Event::Finished { winner } => write!(f, "Game finished regularly. {} won", winner),
            Event::Aborted { reason } if reason.is_empty() => {
                write!(f, "Game was aborted. (No message provided)")
            }
            Event::Aborted { reason } => write!(f, "Game was aborted. {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(value: u8) -> Throw {
        Throw::new(value).unwrap()
    }

    #[test]
    fn test_truthfulness() {
        assert_eq!(Event::throw(PlayerId(0), t(21), t(21)).is_truthful(), Some(true));
        assert_eq!(Event::throw(PlayerId(0), t(21), t(66)).is_truthful(), Some(false));
        assert_eq!(Event::Doubt { player: PlayerId(0) }.is_truthful(), None);
    }

    #[test]
    fn test_redaction_hides_other_players_rolls() {
        let event = Event::throw(PlayerId(1), t(32), t(55));

        let seen_by_other = event.redacted_for(PlayerId(2));
        assert_eq!(
            seen_by_other,
            Event::Throw { player: PlayerId(1), actual: ThrowView::Hidden, stated: t(55) }
        );
        assert_eq!(seen_by_other.is_truthful(), None);

        let seen_by_owner = event.redacted_for(PlayerId(1));
        assert_eq!(seen_by_owner, event);
    }

    #[test]
    fn test_redaction_leaves_other_events_alone() {
        let kick = Event::Eliminated { player: PlayerId(3), reason: EliminationReason::Lying };
        assert_eq!(kick.redacted_for(PlayerId(0)), kick);
    }

    #[test]
    fn test_terminal_and_player() {
        assert!(Event::Finished { winner: PlayerId(2) }.is_terminal());
        assert!(Event::aborted("").is_terminal());
        assert!(!Event::Doubt { player: PlayerId(0) }.is_terminal());

        assert_eq!(Event::Finished { winner: PlayerId(2) }.player(), Some(PlayerId(2)));
        assert_eq!(Event::aborted("x").player(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Event::throw(PlayerId(0), t(31), t(42)).to_string(),
            "Player 0 threw 31, states they threw 42"
        );
        assert_eq!(
            Event::throw(PlayerId(0), t(31), t(42)).redacted_for(PlayerId(1)).to_string(),
            "Player 0 states they threw 42"
        );
        assert_eq!(Event::aborted("").to_string(), "Game was aborted. (No message provided)");
        assert_eq!(
            Event::Eliminated { player: PlayerId(4), reason: EliminationReason::NoResponse }.to_string(),
            "Player 4 was removed. Reason: Player didn't respond"
        );
    }

    #[test]
    fn test_reason_index_matches_all() {
        for (i, reason) in EliminationReason::ALL.iter().enumerate() {
            assert_eq!(reason.index(), i);
        }
    }

    #[test]
    fn test_event_serialization() {
        let event = Event::throw(PlayerId(1), t(65), t(11));
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
