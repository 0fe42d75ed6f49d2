//! Core game types: players, moves, state, RNG, constants.
//!
//! These are plain values with no knowledge of learning. The environment
//! owns a `GameState` and applies `Move`s to it.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Move, MoveList};
pub use config::{
    Spaces, ACTION_SPACE_SIZE, ILLEGAL_MOVE_REWARD, INITIAL_PILES, LOSING_REWARD, MAX_PILE,
    MAX_TAKE, OBSERVATION_SPACE_SIZE, PILE_COUNT,
};
pub use player::PlayerId;
pub use rng::GameRng;
pub use state::GameState;
