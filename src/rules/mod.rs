//! Game rules: seating and the turn-based state machine.
//!
//! A [`Roster`] seats strategies under unique ids. A [`Game`] takes a roster,
//! plays it to completion, and records everything in a
//! [`GameLog`](crate::events::GameLog).

pub mod game;
pub mod roster;

pub use game::{Game, GameError, GameStatus};
pub use roster::{Roster, Seat};
