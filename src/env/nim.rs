//! Three-pile Nim: take one to three pieces, whoever takes the last piece loses.

use log::debug;

use crate::core::{
    GameState, Move, MoveList, Spaces, ILLEGAL_MOVE_REWARD, LOSING_REWARD, PILE_COUNT,
};
use crate::error::{EnvError, Result};

use super::environment::{Environment, IllegalMove, Step, StepOutcome};

/// Identifier the Nim environment is registered under.
pub const NIM_ID: &str = "nim-v0";

/// Check a move against a position.
///
/// Checks run in order: pile index, positive count, count within the pile.
/// The first failure decides.
pub fn check_move(state: &GameState, mv: Move) -> std::result::Result<(), IllegalMove> {
    let Some(&available) = state.piles.get(mv.pile) else {
        return Err(IllegalMove::PileOutOfRange { pile: mv.pile });
    };
    if mv.count == 0 {
        return Err(IllegalMove::NonPositiveCount);
    }
    if mv.count > available {
        return Err(IllegalMove::TooMany {
            pile: mv.pile,
            requested: mv.count,
            available,
        });
    }
    Ok(())
}

/// Apply a move to a position without touching any environment.
///
/// A legal move shrinks exactly one pile. If that empties the board the
/// mover loses and keeps the turn; otherwise the turn passes. An illegal
/// move leaves the position as it was.
#[must_use]
pub fn apply_move(state: &GameState, mv: Move) -> Step {
    if let Err(illegal) = check_move(state, mv) {
        return Step {
            state: *state,
            reward: ILLEGAL_MOVE_REWARD,
            terminated: true,
            truncated: false,
            outcome: StepOutcome::Illegal(illegal),
        };
    }

    let mut next = *state;
    next.piles[mv.pile] -= mv.count;

    if next.is_terminal() {
        Step {
            state: next,
            reward: LOSING_REWARD,
            terminated: true,
            truncated: false,
            outcome: StepOutcome::LastPieceTaken {
                loser: state.on_move,
            },
        }
    } else {
        next.on_move = state.on_move.other();
        Step {
            state: next,
            reward: 0.0,
            terminated: false,
            truncated: false,
            outcome: StepOutcome::Continue,
        }
    }
}

/// Lifecycle of an environment's state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvState {
    /// Nothing has set up a board yet.
    #[default]
    Uninitialized,
    /// A game is in progress (or finished).
    Ready(GameState),
}

/// The Nim environment.
///
/// ## Example
///
/// ```
/// use nim_rl::core::Move;
/// use nim_rl::env::{Environment, NimEnv};
///
/// let mut env = NimEnv::new();
/// env.reset();
///
/// let step = env.step(Move::new(0, 2)).unwrap();
/// assert_eq!(step.state.piles, [5, 5, 3]);
/// assert!(!step.terminated);
/// ```
#[derive(Clone, Debug, Default)]
pub struct NimEnv {
    state: EnvState,
}

impl NimEnv {
    /// Create an uninitialized environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifecycle state.
    #[must_use]
    pub fn env_state(&self) -> &EnvState {
        &self.state
    }
}

impl Environment for NimEnv {
    fn id(&self) -> &str {
        NIM_ID
    }

    fn spaces(&self) -> Spaces {
        Spaces::default()
    }

    fn reset(&mut self) -> GameState {
        let state = GameState::initial();
        self.state = EnvState::Ready(state);
        state
    }

    fn set_board(&mut self, piles: [u8; PILE_COUNT]) {
        match &mut self.state {
            EnvState::Ready(state) => state.piles = piles,
            EnvState::Uninitialized => self.state = EnvState::Ready(GameState::new(piles)),
        }
    }

    fn state(&self) -> Option<&GameState> {
        match &self.state {
            EnvState::Ready(state) => Some(state),
            EnvState::Uninitialized => None,
        }
    }

    fn step(&mut self, mv: Move) -> Result<Step> {
        let EnvState::Ready(state) = &mut self.state else {
            return Err(EnvError::Uninitialized);
        };

        let step = apply_move(state, mv);
        if let StepOutcome::Illegal(reason) = step.outcome {
            debug!("illegal move {mv}: {reason}");
        }
        *state = step.state;

        Ok(step)
    }

    fn legal_moves(&self) -> MoveList {
        match &self.state {
            EnvState::Ready(state) => state.legal_moves(),
            EnvState::Uninitialized => MoveList::new(),
        }
    }

    fn render(&self) -> String {
        match &self.state {
            EnvState::Ready(state) => state.to_string(),
            EnvState::Uninitialized => "Game not started. Call reset() first.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_new_env_is_uninitialized() {
        let env = NimEnv::new();
        assert_eq!(env.env_state(), &EnvState::Uninitialized);
        assert!(env.state().is_none());
        assert!(!env.is_initialized());
        assert!(env.legal_moves().is_empty());
    }

    #[test]
    fn test_step_before_reset_fails() {
        let mut env = NimEnv::new();
        assert_eq!(env.step(Move::new(0, 1)), Err(EnvError::Uninitialized));
        assert_eq!(env.step_raw(&[0]), Err(EnvError::Uninitialized));
    }

    #[test]
    fn test_reset() {
        let mut env = NimEnv::new();
        let state = env.reset();
        assert_eq!(state.piles, [7, 5, 3]);
        assert_eq!(state.on_move, PlayerId::ONE);
        assert_eq!(env.state(), Some(&state));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut env = NimEnv::new();
        let first = env.reset();
        env.step(Move::new(1, 2)).unwrap();
        let second = env.reset();
        assert_eq!(first, second);
    }

    #[test]
    fn test_set_board_initializes() {
        let mut env = NimEnv::new();
        env.set_board([1, 2, 3]);
        let state = env.state().unwrap();
        assert_eq!(state.piles, [1, 2, 3]);
        assert_eq!(state.on_move, PlayerId::ONE);
    }

    #[test]
    fn test_set_board_keeps_player_to_move() {
        let mut env = NimEnv::new();
        env.reset();
        env.step(Move::new(0, 1)).unwrap();
        env.set_board([2, 2, 2]);
        assert_eq!(env.state().unwrap().on_move, PlayerId::TWO);
    }

    #[test]
    fn test_legal_move_alternates() {
        let mut env = NimEnv::new();
        env.reset();

        let step = env.step(Move::new(0, 2)).unwrap();
        assert_eq!(step.state.piles, [5, 5, 3]);
        assert_eq!(step.state.on_move, PlayerId::TWO);
        assert_eq!(step.reward, 0.0);
        assert!(!step.terminated);
        assert!(!step.truncated);
        assert_eq!(step.outcome, StepOutcome::Continue);
    }

    #[test]
    fn test_check_order() {
        let state = GameState::new([0, 0, 0]);
        assert_eq!(
            check_move(&state, Move::new(5, 0)),
            Err(IllegalMove::PileOutOfRange { pile: 5 })
        );
        assert_eq!(
            check_move(&state, Move::new(0, 0)),
            Err(IllegalMove::NonPositiveCount)
        );
        assert_eq!(
            check_move(&state, Move::new(0, 1)),
            Err(IllegalMove::TooMany {
                pile: 0,
                requested: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_illegal_move_leaves_state() {
        let mut env = NimEnv::new();
        let before = env.reset();

        let step = env.step(Move::new(1, 0)).unwrap();
        assert_eq!(step.reward, ILLEGAL_MOVE_REWARD);
        assert!(step.terminated);
        assert_eq!(step.state, before);
        assert_eq!(env.state(), Some(&before));
    }

    #[test]
    fn test_losing_move_keeps_turn() {
        let mut env = NimEnv::new();
        env.set_board([0, 0, 2]);
        env.step(Move::new(2, 1)).unwrap();
        assert_eq!(env.state().unwrap().on_move, PlayerId::TWO);

        let step = env.step(Move::new(2, 1)).unwrap();
        assert!(step.terminated);
        assert_eq!(step.reward, LOSING_REWARD);
        assert_eq!(step.state.on_move, PlayerId::TWO);
        assert_eq!(
            step.outcome,
            StepOutcome::LastPieceTaken {
                loser: PlayerId::TWO
            }
        );
    }

    #[test]
    fn test_step_on_finished_game_is_illegal() {
        let mut env = NimEnv::new();
        env.set_board([0, 0, 0]);
        let step = env.step(Move::new(0, 1)).unwrap();
        assert!(step.terminated);
        assert!(step.is_illegal());
    }

    #[test]
    fn test_render() {
        let mut env = NimEnv::new();
        assert_eq!(env.render(), "Game not started. Call reset() first.");

        env.reset();
        assert_eq!(env.render(), "Player 1's turn\nPiles: [0]:7 [1]:5 [2]:3");
    }

    #[test]
    fn test_id_and_spaces() {
        let env = NimEnv::new();
        assert_eq!(env.id(), "nim-v0");
        assert_eq!(env.spaces().actions, 9);
        assert_eq!(env.spaces().observations, 1024);
    }
}
