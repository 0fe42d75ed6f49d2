//! Game state: pile sizes and whose turn it is.

use serde::{Deserialize, Serialize};

use super::action::{Move, MoveList};
use super::config::{INITIAL_PILES, MAX_TAKE, PILE_COUNT};
use super::player::PlayerId;

/// Complete state of a game.
///
/// Piles only ever shrink. The game is over when every pile is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// Pieces left in each pile.
    pub piles: [u8; PILE_COUNT],
    /// Player whose turn it is.
    pub on_move: PlayerId,
}

impl GameState {
    /// Create a state from piles, with player 1 to move.
    #[must_use]
    pub const fn new(piles: [u8; PILE_COUNT]) -> Self {
        Self {
            piles,
            on_move: PlayerId::ONE,
        }
    }

    /// The starting position `[7, 5, 3]`, player 1 to move.
    #[must_use]
    pub const fn initial() -> Self {
        Self::new(INITIAL_PILES)
    }

    /// Set the player to move.
    #[must_use]
    pub fn with_on_move(mut self, player: PlayerId) -> Self {
        self.on_move = player;
        self
    }

    /// True when every pile is empty.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.piles.iter().all(|&p| p == 0)
    }

    /// Enumerate legal moves, grouped by pile then by count, both ascending.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for (pile, &size) in self.piles.iter().enumerate() {
            for count in 1..=size.min(MAX_TAKE) {
                moves.push(Move::new(pile, count));
            }
        }
        moves
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}'s turn", self.on_move)?;
        write!(f, "Piles:")?;
        for (i, size) in self.piles.iter().enumerate() {
            write!(f, " [{i}]:{size}")?;
        }
        Ok(())
    }
}
