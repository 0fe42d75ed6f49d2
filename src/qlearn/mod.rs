//! Tabular Q-learning for Nim.
//!
//! ## Overview
//!
//! - **StateHasher / MoveIndexer**: dense row and column indices
//! - **QTable**: the learned values and the update rule
//! - **ActionSelector**: noisy greedy moves for the learner, a configurable
//!   policy for the opponent
//! - **QLearningConfig**: learning rate, discount, episode counts, seed
//!
//! Values are always expressed from the maximizing player's perspective.
//! By default its moves bootstrap from the maximum of the next row and the
//! opponent's from the minimum; [`BootstrapRule::NextPlayer`] instead
//! follows whoever is on move next. Either way only the columns of legal
//! moves in the next state take part.
//!
//! ## Usage
//!
//! ```
//! use nim_rl::core::GameState;
//! use nim_rl::qlearn::{QTable, StateHasher};
//!
//! let table = QTable::for_nim();
//! let row = table.row(StateHasher::hash(&GameState::initial()));
//! assert_eq!(row.len(), 9);
//! ```

pub mod config;
pub mod hashing;
pub mod policy;
pub mod table;

pub use config::QLearningConfig;
pub use hashing::{ColumnList, MoveIndexer, StateHasher};
pub use policy::{ActionSelector, GreedyMax, GreedyMin, MovePolicy, OpponentPolicyKind, UniformRandom};
pub use table::{Bootstrap, BootstrapRule, QTable, Transition};
