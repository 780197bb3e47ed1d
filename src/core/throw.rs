//! Dice throws and their game ranking.
//!
//! A throw of two dice is written bigger die first: rolling 4 and 2 gives 42.
//! Throws are ordered by **rank**, never by their numeric value:
//!
//! ```text
//! 31 < 32 < 41 < ... < 65 < 11 < 22 < ... < 66 < 21
//! ```
//!
//! Ordinary rolls come first, then the six doubles, and finally 21
//! ("Mäxchen"), which beats everything.
//!
//! ## ThrowView
//!
//! Observers never learn another player's actual roll. Events shown to
//! them carry a [`ThrowView::Hidden`] placeholder instead, which refuses
//! every comparison and every rank step.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// All legal throw values, ordered by rank.
pub const THROW_VALUES: [u8; 21] = [
    31, 32, 41, 42, 43, 51, 52, 53, 54, 61, 62, 63, 64, 65, // ordinary
    11, 22, 33, 44, 55, 66, // doubles
    21, // Mäxchen
];

/// Number of distinct throws (and ranks).
pub const THROW_COUNT: usize = THROW_VALUES.len();

/// Errors from constructing or stepping throws.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThrowError {
    /// Value is not one of the 21 legal throws.
    InvalidValue(u8),
    /// A die face outside 1-6.
    InvalidFace(u8),
    /// A rank outside `0..THROW_COUNT`.
    InvalidRank(usize),
    /// Text that is not a number.
    Unparsable(String),
    /// Stepping `step` ranks from `rank` leaves the legal range.
    OutOfBounds { rank: u8, step: i32 },
    /// The throw is hidden from this observer.
    Hidden,
}

impl std::fmt::Display for ThrowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThrowError::InvalidValue(v) => write!(f, "{} is not a valid throw", v),
            ThrowError::InvalidFace(v) => write!(f, "die face {} is not in 1..=6", v),
            ThrowError::InvalidRank(r) => write!(f, "rank {} is not in 0..{}", r, THROW_COUNT),
            ThrowError::Unparsable(text) => write!(f, "{:?} is not a throw value", text),
            ThrowError::OutOfBounds { rank, step } => {
                write!(f, "rank {} stepped by {} leaves the range 0..{}", rank, step, THROW_COUNT)
            }
            ThrowError::Hidden => write!(f, "throw is hidden from this observer"),
        }
    }
}

impl std::error::Error for ThrowError {}

/// A legal two-dice throw.
///
/// Stored as its rank, so the derived ordering is the game ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Throw {
    rank: u8,
}

impl Throw {
    /// The lowest throw, 31.
    pub const LOWEST: Throw = Throw { rank: 0 };

    /// The highest throw, 21.
    pub const MAEXCHEN: Throw = Throw { rank: THROW_COUNT as u8 - 1 };

    /// Create a throw from its two-digit value (e.g. `42`, `21`).
    ///
    /// ```
    /// use maexchen::core::Throw;
    ///
    /// assert!(Throw::new(42).is_ok());
    /// assert!(Throw::new(24).is_err()); // smaller die first is not canonical
    /// assert!(Throw::new(66).unwrap() < Throw::new(21).unwrap());
    /// ```
    pub fn new(value: u8) -> Result<Self, ThrowError> {
        THROW_VALUES
            .iter()
            .position(|&v| v == value)
            .map(|rank| Self { rank: rank as u8 })
            .ok_or(ThrowError::InvalidValue(value))
    }

    /// Create a throw from two die faces in any order.
    pub fn from_dice(a: u8, b: u8) -> Result<Self, ThrowError> {
        for face in [a, b] {
            if !(1..=6).contains(&face) {
                return Err(ThrowError::InvalidFace(face));
            }
        }
        Self::new(a.max(b) * 10 + a.min(b))
    }

    /// Create a throw from its rank (0 = 31, 20 = 21).
    pub fn from_rank(rank: usize) -> Result<Self, ThrowError> {
        if rank < THROW_COUNT {
            Ok(Self { rank: rank as u8 })
        } else {
            Err(ThrowError::InvalidRank(rank))
        }
    }

    /// Iterate over all throws from lowest to highest rank.
    pub fn all() -> impl Iterator<Item = Throw> {
        (0..THROW_COUNT as u8).map(|rank| Throw { rank })
    }

    /// Position in the rank order (0-based).
    #[must_use]
    pub const fn rank(self) -> usize {
        self.rank as usize
    }

    /// Two-digit value, bigger die first.
    #[must_use]
    pub const fn value(self) -> u8 {
        THROW_VALUES[self.rank as usize]
    }

    /// The two die faces, bigger first.
    #[must_use]
    pub const fn dice(self) -> (u8, u8) {
        let value = self.value();
        (value / 10, value % 10)
    }

    /// Both dice show the same face.
    #[must_use]
    pub const fn is_double(self) -> bool {
        let (a, b) = self.dice();
        a == b
    }

    /// This is 21, the highest throw.
    #[must_use]
    pub const fn is_maexchen(self) -> bool {
        self.rank as usize == THROW_COUNT - 1
    }

    /// Step `step` ranks up (or down, if negative).
    ///
    /// ```
    /// use maexchen::core::{Throw, ThrowError};
    ///
    /// let t = Throw::new(65).unwrap();
    /// assert_eq!(t.checked_add(1), Throw::new(11));
    /// assert!(matches!(Throw::MAEXCHEN.checked_add(1), Err(ThrowError::OutOfBounds { .. })));
    /// ```
    pub fn checked_add(self, step: i32) -> Result<Throw, ThrowError> {
        i32::from(self.rank)
            .checked_add(step)
            .and_then(|target| usize::try_from(target).ok())
            .and_then(|target| Throw::from_rank(target).ok())
            .ok_or(ThrowError::OutOfBounds { rank: self.rank, step })
    }

    /// Step `step` ranks down.
    pub fn checked_sub(self, step: i32) -> Result<Throw, ThrowError> {
        // -i32::MIN saturates to i32::MAX, out of range from any rank.
        self.checked_add(step.saturating_neg())
    }
}

impl TryFrom<u8> for Throw {
    type Error = ThrowError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Throw::new(value)
    }
}

impl From<Throw> for u8 {
    fn from(throw: Throw) -> Self {
        throw.value()
    }
}

impl FromStr for Throw {
    type Err = ThrowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| ThrowError::Unparsable(s.to_string()))?;
        Throw::new(value)
    }
}

impl std::fmt::Display for Throw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A throw as seen by one observer: either known or hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrowView {
    Known(Throw),
    Hidden,
}

impl ThrowView {
    /// The underlying throw, or `Hidden` if the observer may not see it.
    pub fn throw(self) -> Result<Throw, ThrowError> {
        match self {
            ThrowView::Known(t) => Ok(t),
            ThrowView::Hidden => Err(ThrowError::Hidden),
        }
    }

    #[must_use]
    pub fn is_hidden(self) -> bool {
        matches!(self, ThrowView::Hidden)
    }

    /// Rank comparison; fails if either side is hidden.
    pub fn compare(self, other: ThrowView) -> Result<Ordering, ThrowError> {
        Ok(self.throw()?.cmp(&other.throw()?))
    }

    pub fn checked_add(self, step: i32) -> Result<Throw, ThrowError> {
        self.throw()?.checked_add(step)
    }

    pub fn checked_sub(self, step: i32) -> Result<Throw, ThrowError> {
        self.throw()?.checked_sub(step)
    }
}

impl From<Throw> for ThrowView {
    fn from(throw: Throw) -> Self {
        ThrowView::Known(throw)
    }
}

impl std::fmt::Display for ThrowView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThrowView::Known(t) => write!(f, "{}", t),
            ThrowView::Hidden => write!(f, "??"),
        }
    }
}

/// Probability that a fair roll of two dice equals `throw`.
///
/// Ordinary rolls and Mäxchen can come up two ways (1/18), doubles one way (1/36).
#[must_use]
pub fn prob_eq(throw: Throw) -> f64 {
    if throw.is_double() {
        1.0 / 36.0
    } else {
        1.0 / 18.0
    }
}

/// Probability that a fair roll ranks strictly below `throw`.
#[must_use]
pub fn prob_lt(throw: Throw) -> f64 {
    Throw::all().take(throw.rank()).map(prob_eq).sum()
}

/// Probability that a fair roll ranks at or above `throw`.
#[must_use]
pub fn prob_ge(throw: Throw) -> f64 {
    1.0 - prob_lt(throw)
}
