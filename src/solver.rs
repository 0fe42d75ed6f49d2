//! Exact win/loss solver for misère three-pile Nim.
//!
//! Used as a baseline to measure how close a learned table is to perfect
//! play. The game is impartial, so a position's value depends only on the
//! piles, not on who is on move.
//!
//! Positions are solved bottom-up: every move shrinks one pile, which
//! strictly lowers the packed index, so a single ascending pass suffices.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Move, MoveList, PlayerId, MAX_PILE, PILE_COUNT};
use crate::qlearn::QTable;

const SIDE: usize = MAX_PILE as usize + 1;
const POSITIONS: usize = SIDE * SIDE * SIDE;

fn index(piles: &[u8; PILE_COUNT]) -> usize {
    piles
        .iter()
        .rev()
        .fold(0, |acc, &p| acc * SIDE + usize::from(p))
}

fn piles_of(index: usize) -> [u8; PILE_COUNT] {
    [
        (index % SIDE) as u8,
        (index / SIDE % SIDE) as u8,
        (index / (SIDE * SIDE)) as u8,
    ]
}

/// Win/loss for every board with piles of at most [`MAX_PILE`].
#[derive(Clone, Debug)]
pub struct Solver {
    winning: Vec<bool>,
}

impl Solver {
    /// Solve every position.
    pub fn new() -> Self {
        let mut winning = vec![false; POSITIONS];
        // Nothing left: the previous mover took the last piece and lost.
        winning[0] = true;

        for i in 1..POSITIONS {
            let state = GameState::new(piles_of(i));
            winning[i] = state.legal_moves().into_iter().any(|mv| {
                let next = after(&state, mv);
                !next.is_terminal() && !winning[index(&next.piles)]
            });
        }
        Self { winning }
    }

    /// Whether the player on move can force a win.
    ///
    /// A board with no pieces counts as won for the player on move. Piles
    /// above [`MAX_PILE`] are outside the solved range and report `false`.
    #[must_use]
    pub fn is_winning(&self, state: &GameState) -> bool {
        if state.piles.iter().any(|&p| p > MAX_PILE) {
            return false;
        }
        self.winning[index(&state.piles)]
    }

    /// Legal moves that leave the opponent in a lost position.
    #[must_use]
    pub fn winning_moves(&self, state: &GameState) -> MoveList {
        if state.piles.iter().any(|&p| p > MAX_PILE) {
            return MoveList::new();
        }
        state
            .legal_moves()
            .into_iter()
            .filter(|&mv| {
                let next = after(state, mv);
                !next.is_terminal() && !self.is_winning(&next)
            })
            .collect()
    }

    /// Compare a table's greedy moves against perfect play.
    ///
    /// Looks at every winning, non-empty board reachable from `start` (each
    /// pile at most its starting size) with `player` on move, and counts
    /// the boards where [`QTable::best_move`] is a winning move.
    #[must_use]
    pub fn evaluate(
        &self,
        table: &QTable,
        start: [u8; PILE_COUNT],
        player: PlayerId,
    ) -> PolicyEvaluation {
        let mut eval = PolicyEvaluation::default();
        for i in 1..POSITIONS {
            let piles = piles_of(i);
            if piles.iter().zip(start.iter()).any(|(p, s)| p > s) {
                continue;
            }
            let state = GameState::new(piles).with_on_move(player);
            if !self.is_winning(&state) {
                continue;
            }
            eval.positions += 1;
            let winning = self.winning_moves(&state);
            if table.best_move(&state).is_some_and(|mv| winning.contains(&mv)) {
                eval.correct += 1;
            }
        }
        eval
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

fn after(state: &GameState, mv: Move) -> GameState {
    let mut piles = state.piles;
    piles[mv.pile] -= mv.count;
    GameState::new(piles).with_on_move(state.on_move.other())
}

/// How often a table's greedy move matches perfect play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyEvaluation {
    /// Winning positions examined.
    pub positions: usize,
    /// Positions where the table picks a winning move.
    pub correct: usize,
}

impl PolicyEvaluation {
    /// Fraction of positions played correctly, 0 if none were examined.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.positions == 0 {
            0.0
        } else {
            self.correct as f64 / self.positions as f64
        }
    }
}
