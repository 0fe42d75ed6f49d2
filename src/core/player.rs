//! Player identification for a two-player game.
//!
//! Players are numbered the way the environment reports them: the first
//! player is `PlayerId::ONE` (raw value 1), the second `PlayerId::TWO`
//! (raw value 2). Alternation is `3 - id`.

use serde::{Deserialize, Serialize};

/// Player identifier, always 1 or 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who moves first after `reset()`.
    pub const ONE: PlayerId = PlayerId(1);
    /// The second player.
    pub const TWO: PlayerId = PlayerId(2);

    /// Create a player ID from its raw value.
    ///
    /// Returns `None` unless `id` is 1 or 2.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        match id {
            1 | 2 => Some(Self(id)),
            _ => None,
        }
    }

    /// Get the raw value (1 or 2).
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// The player who moves after this one.
    #[must_use]
    pub const fn other(self) -> Self {
        Self(3 - self.0)
    }

    /// Turn bit used when packing a state: 0 for player 1, 1 for player 2.
    #[must_use]
    pub const fn turn_bit(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Both players in turn order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [Self::ONE, Self::TWO].into_iter()
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("player id must be 1 or 2, got {value}"))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}
