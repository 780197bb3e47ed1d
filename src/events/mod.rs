//! Events and the game log.
//!
//! Events are an immutable, closed set of records. The log appends them
//! into per-move rounds and answers whether the game has concluded.

pub mod event;
pub mod log;

pub use event::{EliminationReason, Event};
pub use log::{GameLog, Round, RosterEntry};
