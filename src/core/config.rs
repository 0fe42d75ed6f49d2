//! Game constants and declared spaces.
//!
//! The game is fixed: three piles, at most three pieces per move, pile
//! sizes never above seven. Everything that sizes a table derives from
//! these constants.

use serde::{Deserialize, Serialize};

/// Number of piles on the board.
pub const PILE_COUNT: usize = 3;

/// Maximum number of pieces a single move may remove.
pub const MAX_TAKE: u8 = 3;

/// Largest pile value the state encoding can represent (3 bits per pile).
pub const MAX_PILE: u8 = 7;

/// Board produced by `reset()`.
pub const INITIAL_PILES: [u8; PILE_COUNT] = [7, 5, 3];

/// Reward for a legal move that takes the last piece.
pub const LOSING_REWARD: f64 = -1.0;

/// Reward for a well-formed move that breaks the rules.
pub const ILLEGAL_MOVE_REWARD: f64 = -2.0;

/// Size of the flat action space: every (pile, count) pair.
pub const ACTION_SPACE_SIZE: usize = PILE_COUNT * MAX_TAKE as usize;

/// Size of the flat observation space: 8 values per pile times the turn bit.
pub const OBSERVATION_SPACE_SIZE: usize = 8 * 8 * 8 * 2;

/// Declared action and observation spaces of an environment.
///
/// Both are upper bounds: not every action is legal in every state and
/// not every observation is reachable from the initial board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spaces {
    /// Number of distinct move indices.
    pub actions: usize,
    /// Number of distinct state indices.
    pub observations: usize,
}

impl Default for Spaces {
    fn default() -> Self {
        Self {
            actions: ACTION_SPACE_SIZE,
            observations: OBSERVATION_SPACE_SIZE,
        }
    }
}
