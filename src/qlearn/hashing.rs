//! Dense indices for table rows (states) and columns (moves).
//!
//! States pack into ten bits: the turn bit, then three bits per pile.
//! Permutations of the same piles get different rows; the table is a bit
//! larger than it needs to be, but the mapping stays injective.

use smallvec::SmallVec;

use crate::core::{GameState, Move, PlayerId, ACTION_SPACE_SIZE, MAX_TAKE, OBSERVATION_SPACE_SIZE};

/// Column indices of the legal moves in a state.
pub type ColumnList = SmallVec<[usize; ACTION_SPACE_SIZE]>;

const PILE_BITS: u32 = 3;
const PILE_MASK: usize = (1 << PILE_BITS) - 1;

/// Maps a state to a row index in `[0, 1024)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StateHasher;

impl StateHasher {
    /// Number of distinct indices.
    pub const SIZE: usize = OBSERVATION_SPACE_SIZE;

    /// Pack a state: `turn | piles[0] << 1 | piles[1] << 4 | piles[2] << 7`.
    ///
    /// Pile values above 7 do not fit; they are masked to three bits.
    #[must_use]
    pub fn hash(state: &GameState) -> usize {
        state
            .piles
            .iter()
            .enumerate()
            .fold(state.on_move.turn_bit(), |acc, (i, &pile)| {
                acc | ((usize::from(pile) & PILE_MASK) << (1 + PILE_BITS as usize * i))
            })
    }

    /// Recover the state a row index was packed from.
    #[must_use]
    pub fn unhash(index: usize) -> GameState {
        let on_move = if index & 1 == 0 {
            PlayerId::ONE
        } else {
            PlayerId::TWO
        };
        let pile = |i: usize| ((index >> (1 + PILE_BITS as usize * i)) & PILE_MASK) as u8;
        GameState::new([pile(0), pile(1), pile(2)]).with_on_move(on_move)
    }
}

/// Maps a move to a column index in `[0, 9)` and back.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveIndexer;

impl MoveIndexer {
    /// Number of distinct indices.
    pub const SIZE: usize = ACTION_SPACE_SIZE;

    /// Column of a move: `3 * pile + (count - 1)`.
    ///
    /// Returns `None` for moves outside the flat scheme (pile above 2,
    /// count outside 1..=3).
    #[must_use]
    pub fn to_index(mv: Move) -> Option<usize> {
        let take = usize::from(MAX_TAKE);
        if mv.count == 0 || usize::from(mv.count) > take {
            return None;
        }
        let index = mv.pile.checked_mul(take)? + usize::from(mv.count) - 1;
        (index < Self::SIZE).then_some(index)
    }

    /// Move in a column.
    #[must_use]
    pub fn to_move(index: usize) -> Option<Move> {
        if index >= Self::SIZE {
            return None;
        }
        let take = usize::from(MAX_TAKE);
        Some(Move::new(index / take, (index % take) as u8 + 1))
    }

    /// Columns of every legal move in `state`, in legal-move order.
    #[must_use]
    pub fn columns(state: &GameState) -> ColumnList {
        state
            .legal_moves()
            .into_iter()
            .filter_map(Self::to_index)
            .collect()
    }
}
