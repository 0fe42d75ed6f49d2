//! # nim-rl
//!
//! A three-pile misère Nim environment for reinforcement learning, plus a
//! tabular Q-learning trainer.
//!
//! ## Design Principles
//!
//! 1. **Gym-style interface**: `reset`, `step`, `render`, with illegal moves
//!    reported in-band as a terminating penalty rather than as errors.
//!
//! 2. **Explicit lifecycle**: stepping before `reset()` or `set_board()` is
//!    an error, never a panic.
//!
//! 3. **Deterministic training**: all randomness flows from one seeded
//!    [`GameRng`], so a seed reproduces a run exactly.
//!
//! ## Modules
//!
//! - `core`: piles, moves, players, constants, RNG
//! - `env`: the `Environment` trait, `NimEnv`, the id registry
//! - `qlearn`: state/move indexing, the Q-table, move selection, config
//! - `training`: the episode loop and progress statistics
//! - `solver`: exact win/loss values for evaluating learned tables
//! - `error`: error types

pub mod core;
pub mod env;
pub mod error;
pub mod qlearn;
pub mod solver;
pub mod training;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    GameRng, GameState, Move, MoveList, PlayerId, Spaces, ACTION_SPACE_SIZE,
    INITIAL_PILES, OBSERVATION_SPACE_SIZE, PILE_COUNT,
};

pub use crate::env::{make, Environment, IllegalMove, NimEnv, Registry, Step, StepOutcome, NIM_ID};

pub use crate::error::{ConfigError, EnvError, Result};

pub use crate::qlearn::{
    ActionSelector, BootstrapRule, MoveIndexer, OpponentPolicyKind, QLearningConfig, QTable,
    StateHasher,
};

pub use crate::solver::{PolicyEvaluation, Solver};

pub use crate::training::{
    EpisodeEnd, EpisodeSummary, RollingRewardWindow, Trainer, TrainingReport, TrainingStats,
};
