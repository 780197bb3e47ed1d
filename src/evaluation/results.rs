//! Aggregated outcomes of an evaluation batch.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::events::{EliminationReason, Event, GameLog, RosterEntry};

use super::report::format_table;

/// Tallies for one seat across a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    /// Games won.
    pub wins: u32,
    /// Move count of each won game, in play order.
    pub winning_moves: Vec<u32>,
    /// Eliminations, indexed by [`EliminationReason::index`].
    pub losses: [u32; 4],
}

impl PlayerRecord {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            wins: 0,
            winning_moves: Vec::new(),
            losses: [0; 4],
        }
    }

    #[must_use]
    pub fn losses_for(&self, reason: EliminationReason) -> u32 {
        self.losses[reason.index()]
    }

    #[must_use]
    pub fn total_losses(&self) -> u32 {
        self.losses.iter().sum()
    }

    /// Mean move count of won games (0 without wins).
    #[must_use]
    pub fn average_winning_move(&self) -> f64 {
        if self.winning_moves.is_empty() {
            0.0
        } else {
            let total: u64 = self.winning_moves.iter().map(|&m| u64::from(m)).sum();
            total as f64 / self.winning_moves.len() as f64
        }
    }

    /// Share of this player's losses with the given reason (0 without losses).
    #[must_use]
    pub fn loss_frequency(&self, reason: EliminationReason) -> f64 {
        let total = self.total_losses();
        if total == 0 {
            0.0
        } else {
            f64::from(self.losses_for(reason)) / f64::from(total)
        }
    }
}

/// Results of an evaluation batch.
///
/// Every derived ratio is defined as 0 when its denominator is 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResults {
    players: Vec<PlayerRecord>,
    repetitions: u32,
    aborted: u32,
}

impl EvaluationResults {
    /// Empty results for the given roster.
    #[must_use]
    pub fn new(roster: &[RosterEntry]) -> Self {
        Self {
            players: roster
                .iter()
                .map(|entry| PlayerRecord::new(entry.id, entry.name.clone()))
                .collect(),
            repetitions: 0,
            aborted: 0,
        }
    }

    /// Fold one finished (or aborted) game into the tallies.
    pub fn record(&mut self, log: &GameLog, move_count: u32) {
        self.repetitions += 1;

        for event in log.events() {
            if let Event::Eliminated { player, reason } = event {
                if let Some(record) = self.record_mut(*player) {
                    record.losses[reason.index()] += 1;
                }
            }
        }

        match log.winner() {
            Some(winner) => {
                if let Some(record) = self.record_mut(winner) {
                    record.wins += 1;
                    record.winning_moves.push(move_count);
                }
            }
            None => self.aborted += 1,
        }
    }

    fn record_mut(&mut self, id: PlayerId) -> Option<&mut PlayerRecord> {
        self.players.iter_mut().find(|record| record.id == id)
    }

    /// Per-player records in roster order.
    #[must_use]
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.iter().find(|record| record.id == id)
    }

    /// Games played, aborted ones included.
    #[must_use]
    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    /// Games that ended without a winner.
    #[must_use]
    pub fn aborted(&self) -> u32 {
        self.aborted
    }

    #[must_use]
    pub fn total_wins(&self) -> u32 {
        self.players.iter().map(|record| record.wins).sum()
    }

    /// Wins of `id` divided by games played.
    #[must_use]
    pub fn win_rate(&self, id: PlayerId) -> f64 {
        match self.player(id) {
            Some(record) if self.repetitions > 0 => f64::from(record.wins) / f64::from(self.repetitions),
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn average_winning_move(&self, id: PlayerId) -> f64 {
        self.player(id).map_or(0.0, PlayerRecord::average_winning_move)
    }

    #[must_use]
    pub fn loss_frequency(&self, id: PlayerId, reason: EliminationReason) -> f64 {
        self.player(id).map_or(0.0, |record| record.loss_frequency(reason))
    }

    /// Human-readable table, one row per player.
    ///
    /// Rows are sorted by descending win rate when `sort_by_win_rate` is set,
    /// otherwise kept in roster order.
    #[must_use]
    pub fn summary(&self, sort_by_win_rate: bool) -> String {
        let mut order: Vec<&PlayerRecord> = self.players.iter().collect();
        if sort_by_win_rate {
            // Stable, so ties stay in roster order.
            order.sort_by(|a, b| b.wins.cmp(&a.wins));
        }

        let mut header = vec![
            "Player".to_string(),
            "Wins".to_string(),
            "Win rate".to_string(),
            "Avg. winning move".to_string(),
        ];
        header.extend(EliminationReason::ALL.iter().map(|reason| format!("% {}", reason.label())));

        let mut rows = vec![header];
        for record in order {
            let mut row = vec![
                format!("{} ({})", record.name, record.id.raw()),
                record.wins.to_string(),
                format!("{:.1}%", self.win_rate(record.id) * 100.0),
                format!("{:.1}", record.average_winning_move()),
            ];
            row.extend(
                EliminationReason::ALL
                    .iter()
                    .map(|&reason| format!("{:.1}%", record.loss_frequency(reason) * 100.0)),
            );
            rows.push(row);
        }

        let mut table = format_table(&rows, 2);
        if self.aborted > 0 {
            table.push_str(&format!("{} of {} games were aborted\n", self.aborted, self.repetitions));
        }
        table
    }
}
