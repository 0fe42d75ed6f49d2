//! Move representation: which pile, how many pieces.
//!
//! A `Move` is always well-formed (exactly a pile index and a count), but
//! it is not necessarily legal: legality depends on the board and is
//! checked by the environment when the move is applied. Untyped input
//! (for example a list coming from Python or the command line) is
//! converted with [`Move::from_raw`], the only fallible step.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::EnvError;

use super::config::ACTION_SPACE_SIZE;

/// A single move: remove `count` pieces from pile `pile`.
///
/// ## Example
///
/// ```
/// use nim_rl::core::Move;
///
/// let mv = Move::new(0, 3);
/// assert_eq!(mv.pile, 0);
/// assert_eq!(mv.count, 3);
/// assert_eq!(format!("{}", mv), "[0, 3]");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    /// Index of the pile to take from.
    pub pile: usize,
    /// Number of pieces to remove.
    pub count: u8,
}

/// Moves available in one position.
///
/// There are never more than nine, so they stay on the stack.
pub type MoveList = SmallVec<[Move; ACTION_SPACE_SIZE]>;

impl Move {
    /// Create a move.
    #[must_use]
    pub const fn new(pile: usize, count: u8) -> Self {
        Self { pile, count }
    }

    /// Parse a move from raw integers.
    ///
    /// The input must be exactly `[pile, count]`; anything else is a
    /// malformed action. Values that do not fit the move's fields are
    /// saturated so that legality checking still reports the right
    /// reason: a negative pile becomes an out-of-range pile, a negative
    /// count becomes a zero count, and an oversized count exceeds any pile.
    pub fn from_raw(raw: &[i64]) -> Result<Self, EnvError> {
        let [pile, count] = raw else {
            return Err(EnvError::MalformedAction(format!(
                "{raw:?}: expected [pile, count]"
            )));
        };

        let pile = usize::try_from(*pile).unwrap_or(usize::MAX);
        let count = u8::try_from((*count).max(0)).unwrap_or(u8::MAX);

        Ok(Self { pile, count })
    }

    /// Raw `[pile, count]` form, as reported by the move generator.
    #[must_use]
    pub fn to_raw(self) -> [i64; 2] {
        [self.pile as i64, i64::from(self.count)]
    }
}

impl TryFrom<&[i64]> for Move {
    type Error = EnvError;

    fn try_from(raw: &[i64]) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<(usize, u8)> for Move {
    fn from((pile, count): (usize, u8)) -> Self {
        Self::new(pile, count)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.pile, self.count)
    }
}

impl std::str::FromStr for Move {
    type Err = EnvError;

    /// Parse `"pile,count"` (brackets and spaces optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');
        let raw = trimmed
            .split(',')
            .map(|part| part.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EnvError::MalformedAction(format!("{s:?}: {e}")))?;
        Self::from_raw(&raw)
    }
}
