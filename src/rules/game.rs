//! The game state machine.
//!
//! ## Lifecycle
//!
//! ```text
//! Unstarted --init()--> Initialized --make_move()--> Running --...--> Finished
//!                                                       |
//!                                                       +-----------> Aborted
//! ```
//!
//! One [`Game::make_move`] call plays one full turn and opens one round in
//! the log. Seats are never removed during play: a parallel `alive` vector,
//! index-aligned with the seat order, marks who is still in.
//!
//! ## Turn order
//!
//! After an accepted claim the turn passes to the next alive seat. When the
//! current player is eliminated, the next alive seat moves. When the
//! current player catches a liar, the liar is out and the current player
//! keeps the turn to open a fresh bid.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, GameRng, PlayerId, Throw};
use crate::events::{EliminationReason, Event, GameLog};
use crate::strategy::Decision;

use super::roster::{Roster, Seat};

/// Where a game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Unstarted,
    Initialized,
    Running,
    Finished,
    Aborted,
}

impl GameStatus {
    /// Finished or aborted.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Finished | GameStatus::Aborted)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::Unstarted => "unstarted",
            GameStatus::Initialized => "initialized",
            GameStatus::Running => "running",
            GameStatus::Finished => "finished",
            GameStatus::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Errors from setting up or driving a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// A game needs at least two players.
    TooFewPlayers { count: usize },
    /// The id is already seated in the roster.
    DuplicatePlayerId(PlayerId),
    /// `init()` was called on a game that already left `Unstarted`.
    AlreadyInitialized(GameStatus),
    /// A move was requested in a state that does not accept one.
    NotRunning(GameStatus),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::TooFewPlayers { count } => {
                write!(f, "a game needs at least 2 players, got {}", count)
            }
            GameError::DuplicatePlayerId(id) => write!(f, "{} is already seated", id),
            GameError::AlreadyInitialized(status) => {
                write!(f, "cannot initialize a game that is {}", status)
            }
            GameError::NotRunning(status) => write!(f, "cannot move in a game that is {}", status),
        }
    }
}

impl std::error::Error for GameError {}

/// The claim currently on the table.
#[derive(Clone, Copy, Debug)]
struct Bid {
    seat: usize,
    actual: Throw,
    stated: Throw,
}

/// One game of Mäxchen.
///
/// ## Example
///
/// ```
/// use maexchen::core::GameConfig;
/// use maexchen::rules::{Game, GameStatus, Roster};
/// use maexchen::strategy::{Dummy, Threshold};
///
/// let mut roster = Roster::new();
/// roster.push(Box::new(Dummy::new()));
/// roster.push(Box::new(Threshold::new()));
///
/// let mut game = Game::new(roster, GameConfig::new().with_seed(7));
/// assert_eq!(game.run().unwrap(), GameStatus::Finished);
/// assert!(game.winner().is_some());
/// assert!(game.log().has_finished());
/// ```
#[derive(Debug)]
pub struct Game {
    roster: Roster,
    alive: Vec<bool>,
    config: GameConfig,
    rng: GameRng,
    log: GameLog,
    status: GameStatus,
    current: usize,
    pending: Option<Bid>,
    move_count: u32,
}

impl Game {
    /// Create a game. The log snapshots the roster as given.
    #[must_use]
    pub fn new(roster: Roster, config: GameConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let log = GameLog::new(roster.entries());
        let alive = vec![true; roster.len()];
        Self {
            roster,
            alive,
            config,
            rng,
            log,
            status: GameStatus::Unstarted,
            current: 0,
            pending: None,
            move_count: 0,
        }
    }

    /// Seed of this game's RNG; replaying with it reproduces the game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seats in play order.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Give the strategies back, with whatever state they built up.
    #[must_use]
    pub fn into_roster(self) -> Roster {
        self.roster
    }

    /// Whose turn it is, while the game is in play.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Initialized | GameStatus::Running => {
                self.roster.seats().get(self.current).map(Seat::id)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|&&alive| alive).count()
    }

    /// Whether `id` is seated and not eliminated.
    #[must_use]
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.seat_of(id).is_some_and(|seat| self.alive[seat])
    }

    /// The claim the next player has to beat.
    #[must_use]
    pub fn pending_claim(&self) -> Option<Throw> {
        self.pending.map(|bid| bid.stated)
    }

    /// Number of moves played so far.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.log.winner()
    }

    /// Check the roster, optionally shuffle the seats, and pick who starts.
    ///
    /// With fewer than two players the game is aborted and
    /// [`GameError::TooFewPlayers`] is returned.
    pub fn init(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::Unstarted {
            return Err(GameError::AlreadyInitialized(self.status));
        }

        let count = self.roster.len();
        if count < 2 {
            self.abort(format!("Too few players: {}", count));
            return Err(GameError::TooFewPlayers { count });
        }

        if self.config.shuffle_players {
            self.roster.shuffle(&mut self.rng);
        }
        self.alive = vec![true; count];
        self.current = self.rng.gen_range_usize(0..count);
        self.status = GameStatus::Initialized;
        Ok(())
    }

    /// Play one turn and return the status afterwards.
    pub fn make_move(&mut self) -> Result<GameStatus, GameError> {
        match self.status {
            GameStatus::Initialized => self.status = GameStatus::Running,
            GameStatus::Running => {}
            other => return Err(GameError::NotRunning(other)),
        }

        if let Some(max) = self.config.max_moves {
            if self.move_count >= max {
                self.abort(format!("Move limit of {} reached", max));
                return Ok(self.status);
            }
        }

        let move_index = self.move_count;
        self.move_count += 1;
        self.log.new_round();

        let seat = self.current;
        let eliminated = self.play_turn(seat, move_index);

        match self.alive_count() {
            0 => self.abort("No players left"),
            1 => self.finish(),
            _ => {
                // After catching a liar the current player bids again.
                if eliminated.is_none() || !self.alive[seat] {
                    self.current = self.next_alive_after(seat);
                }
            }
        }
        Ok(self.status)
    }

    /// Initialize if needed, then move until the game is over.
    pub fn run(&mut self) -> Result<GameStatus, GameError> {
        if self.status == GameStatus::Unstarted {
            self.init()?;
        }
        while !self.status.is_terminal() {
            self.make_move()?;
        }
        Ok(self.status)
    }

    /// Returns the seat eliminated this turn, if any.
    fn play_turn(&mut self, seat: usize, move_index: u32) -> Option<usize> {
        let player = self.roster.seats()[seat].id();

        if let Some(bid) = self.pending {
            let strategy = &mut self.roster.seats_mut()[seat].strategy;
            match strategy.decide_doubt(bid.stated, move_index, &mut self.rng) {
                Decision::NoResponse => {
                    return Some(self.eliminate(seat, EliminationReason::NoResponse));
                }
                Decision::Answer(true) => {
                    self.emit(Event::Doubt { player });
                    let (loser, reason) = if bid.actual == bid.stated {
                        (seat, EliminationReason::FalseAccusation)
                    } else {
                        (bid.seat, EliminationReason::Lying)
                    };
                    return Some(self.eliminate(loser, reason));
                }
                Decision::Answer(false) => {}
            }
        }

        let actual = self.rng.roll_throw();
        let pending = self.pending_claim();
        let strategy = &mut self.roster.seats_mut()[seat].strategy;
        let Decision::Answer(stated) = strategy.decide_claim(actual, pending, move_index, &mut self.rng) else {
            return Some(self.eliminate(seat, EliminationReason::NoResponse));
        };

        self.emit(Event::throw(player, actual, stated));
        match pending {
            Some(pending) if stated <= pending => {
                Some(self.eliminate(seat, EliminationReason::FailedToBeatPredecessor))
            }
            _ => {
                self.pending = Some(Bid { seat, actual, stated });
                None
            }
        }
    }

    fn eliminate(&mut self, seat: usize, reason: EliminationReason) -> usize {
        let player = self.roster.seats()[seat].id();
        if reason == EliminationReason::NoResponse {
            log::warn!("{} did not respond at move {}", player, self.move_count);
        }
        log::debug!("{} eliminated: {}", player, reason);

        self.alive[seat] = false;
        self.pending = None;
        self.emit(Event::Eliminated { player, reason });
        seat
    }

    fn finish(&mut self) {
        let Some(seat) = self.alive.iter().position(|&alive| alive) else {
            self.abort("No players left");
            return;
        };
        let winner = self.roster.seats()[seat].id();
        log::debug!("{} wins after {} moves", winner, self.move_count);
        self.emit(Event::Finished { winner });
        self.status = GameStatus::Finished;
    }

    fn abort(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("Game with seed {} aborted: {}", self.rng.seed(), reason);
        self.emit(Event::aborted(reason));
        self.status = GameStatus::Aborted;
    }

    /// Append to the log and show every listener its redacted copy.
    fn emit(&mut self, event: Event) {
        for seat in self.roster.seats_mut() {
            if seat.strategy.listens_to_events() {
                let viewer = seat.id();
                seat.strategy.on_event(&event.redacted_for(viewer));
            }
        }
        self.log.happen(event);
    }

    fn next_alive_after(&self, seat: usize) -> usize {
        let n = self.alive.len();
        (1..=n)
            .map(|step| (seat + step) % n)
            .find(|&i| self.alive[i])
            .unwrap_or(seat)
    }

    fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.roster.seats().iter().position(|seat| seat.id() == id)
    }
}
