//! Environment trait and step results.
//!
//! An environment owns a game and exposes it through a small contract:
//! - `reset` / `set_board` put it into a known position
//! - `step` applies one move and reports reward and terminality
//! - `legal_moves` enumerates what the player to move may do
//! - `render` describes the position for humans
//!
//! Learners only ever talk to this trait.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Move, MoveList, PlayerId, Spaces, PILE_COUNT};
use crate::error::{EnvError, Result};

/// Why a well-formed move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IllegalMove {
    /// The pile index does not name a pile.
    PileOutOfRange { pile: usize },
    /// The move removes no pieces.
    NonPositiveCount,
    /// The move removes more pieces than the pile holds.
    TooMany { pile: usize, requested: u8, available: u8 },
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::PileOutOfRange { pile } => write!(f, "invalid pile {pile}"),
            IllegalMove::NonPositiveCount => write!(f, "count must be positive"),
            IllegalMove::TooMany {
                pile,
                requested,
                available,
            } => write!(
                f,
                "trying to take {requested} from pile {pile} with only {available} pieces"
            ),
        }
    }
}

/// What a step did, beyond the reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Legal move, game continues with the other player.
    Continue,
    /// Legal move that took the last piece; the mover lost.
    LastPieceTaken { loser: PlayerId },
    /// Rule-breaking move; nothing on the board changed.
    Illegal(IllegalMove),
}

/// Result of a single `step`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// State after the move.
    pub state: GameState,
    /// Reward from the mover's perspective.
    pub reward: f64,
    /// The episode is over.
    pub terminated: bool,
    /// Always false: the environment has no time limit of its own.
    pub truncated: bool,
    /// What happened.
    pub outcome: StepOutcome,
}

impl Step {
    /// True when the move was rejected.
    #[must_use]
    pub fn is_illegal(&self) -> bool {
        matches!(self.outcome, StepOutcome::Illegal(_))
    }
}

/// A two-player game environment.
///
/// ## Implementation Notes
///
/// - `step` must fail with [`EnvError::Uninitialized`] before the first
///   `reset` or `set_board`
/// - `render` must not fail on an uninitialized environment
/// - `legal_moves` returns an empty list when uninitialized or finished
pub trait Environment {
    /// Identifier this environment is registered under.
    fn id(&self) -> &str;

    /// Declared action and observation spaces.
    fn spaces(&self) -> Spaces;

    /// Put the environment into its initial position.
    fn reset(&mut self) -> GameState;

    /// Override the pile sizes, keeping the player to move.
    ///
    /// Initializes the environment with player 1 to move if needed.
    /// Values are not checked against the pile bound.
    fn set_board(&mut self, piles: [u8; PILE_COUNT]);

    /// Current state, `None` before initialization.
    fn state(&self) -> Option<&GameState>;

    /// Apply a move.
    fn step(&mut self, mv: Move) -> Result<Step>;

    /// Legal moves for the player to move.
    fn legal_moves(&self) -> MoveList;

    /// Human-readable description of the position.
    fn render(&self) -> String;

    // === Convenience Methods ===

    /// Apply a move given as raw integers.
    ///
    /// Checks initialization first, then the shape of the input.
    fn step_raw(&mut self, raw: &[i64]) -> Result<Step> {
        if self.state().is_none() {
            return Err(EnvError::Uninitialized);
        }
        let mv = Move::from_raw(raw)?;
        self.step(mv)
    }

    /// True once the environment has a state.
    fn is_initialized(&self) -> bool {
        self.state().is_some()
    }
}
