//! Dense Q-value table and the Q-learning update.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Move, PlayerId};

use super::hashing::{MoveIndexer, StateHasher};

/// Which extreme of the next row the update bootstraps from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bootstrap {
    /// The mover is the maximizing player.
    Max,
    /// The mover is the opponent; its value is taken pessimistically.
    Min,
}

/// Rule for picking the [`Bootstrap`] of a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapRule {
    /// Follow the mover: the maximizing player's moves bootstrap from the
    /// maximum of the next row, the opponent's from the minimum.
    #[default]
    Mover,
    /// Follow the player on move in the next state, as in minimax.
    NextPlayer,
}

impl BootstrapRule {
    /// Bootstrap for a move made by `mover`.
    #[must_use]
    pub fn for_mover(self, mover: PlayerId, maximizing_player: PlayerId) -> Bootstrap {
        let maximizer_moved = mover == maximizing_player;
        match (self, maximizer_moved) {
            (Self::Mover, true) | (Self::NextPlayer, false) => Bootstrap::Max,
            (Self::Mover, false) | (Self::NextPlayer, true) => Bootstrap::Min,
        }
    }
}

impl std::str::FromStr for BootstrapRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "mover" => Ok(Self::Mover),
            "next_player" => Ok(Self::NextPlayer),
            other => Err(format!("unknown bootstrap rule '{other}' (expected 'mover' or 'next-player')")),
        }
    }
}

impl std::fmt::Display for BootstrapRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mover => write!(f, "mover"),
            Self::NextPlayer => write!(f, "next-player"),
        }
    }
}

/// One observed transition, already in table coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Row of the state the move was made in.
    pub state: usize,
    /// Column of the move.
    pub action: usize,
    /// Reward from the maximizing player's perspective.
    pub reward: f64,
    /// Row of the resulting state.
    pub next_state: usize,
    /// The move ended the game.
    pub terminal: bool,
    /// How to value the next state.
    pub bootstrap: Bootstrap,
}

/// Q-values indexed by (state row, move column).
///
/// Fixed size for its whole life, zero-initialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Create a zeroed table.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Create a table sized for every packed state and every flat move.
    #[must_use]
    pub fn for_nim() -> Self {
        Self::new(StateHasher::SIZE, MoveIndexer::SIZE)
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get a value.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the table.
    #[must_use]
    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.values[self.offset(state, action)]
    }

    /// Set a value.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the table.
    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        let offset = self.offset(state, action);
        self.values[offset] = value;
    }

    /// All values for one state.
    #[must_use]
    pub fn row(&self, state: usize) -> &[f64] {
        let start = state * self.cols;
        &self.values[start..start + self.cols]
    }

    /// Largest value among some columns of a row, `None` if `actions` is empty.
    #[must_use]
    pub fn max_over(&self, state: usize, actions: &[usize]) -> Option<f64> {
        let row = self.row(state);
        actions.iter().map(|&a| row[a]).reduce(f64::max)
    }

    /// Smallest value among some columns of a row, `None` if `actions` is empty.
    #[must_use]
    pub fn min_over(&self, state: usize, actions: &[usize]) -> Option<f64> {
        let row = self.row(state);
        actions.iter().map(|&a| row[a]).reduce(f64::min)
    }

    /// Apply the Q-learning rule to one transition and return the new value.
    ///
    /// `Q[s,a] += lr * (r + gamma * ext Q[s', a'] - Q[s,a])`, where `ext` is
    /// the maximum or minimum over `next_actions`, the columns playable in
    /// the next state. A terminal transition, or one with nothing playable
    /// next, has no future value.
    pub fn update(
        &mut self,
        transition: &Transition,
        next_actions: &[usize],
        learning_rate: f64,
        discount: f64,
    ) -> f64 {
        let future = if transition.terminal {
            0.0
        } else {
            match transition.bootstrap {
                Bootstrap::Max => self.max_over(transition.next_state, next_actions),
                Bootstrap::Min => self.min_over(transition.next_state, next_actions),
            }
            .unwrap_or(0.0)
        };

        let current = self.get(transition.state, transition.action);
        let updated = current + learning_rate * (transition.reward + discount * future - current);
        self.set(transition.state, transition.action, updated);
        updated
    }

    /// Iterate over non-zero entries as (state, action, value).
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(move |(i, &v)| (i / self.cols, i % self.cols, v))
    }

    /// Number of entries that have moved off zero.
    #[must_use]
    pub fn nonzero_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }

    /// Legal move with the highest value in a position, first one on ties.
    #[must_use]
    pub fn best_move(&self, state: &GameState) -> Option<Move> {
        let row = self.row(StateHasher::hash(state));
        let mut best: Option<(Move, f64)> = None;
        for mv in state.legal_moves() {
            let Some(col) = MoveIndexer::to_index(mv) else {
                continue;
            };
            if best.map_or(true, |(_, value)| row[col] > value) {
                best = Some((mv, row[col]));
            }
        }
        best.map(|(mv, _)| mv)
    }

    fn offset(&self, state: usize, action: usize) -> usize {
        assert!(
            state < self.rows && action < self.cols,
            "({state}, {action}) outside {}x{} table",
            self.rows,
            self.cols
        );
        state * self.cols + action
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::for_nim()
    }
}
