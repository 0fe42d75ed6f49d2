//! Training statistics for monitoring runs.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::env::IllegalMove;

/// How an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeEnd {
    /// Someone took the last piece.
    LastPieceTaken { loser: PlayerId },
    /// A rule-breaking move ended the game.
    Illegal { by: PlayerId, reason: IllegalMove },
    /// The step cap was reached first.
    Truncated,
    /// The starting position had no legal move.
    NoMoves,
}

/// Result of one training episode.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode index, from 0.
    pub episode: usize,
    /// Transitions applied.
    pub steps: usize,
    /// Sum of rewards from the maximizing player's perspective.
    pub total_reward: f64,
    /// How it ended.
    pub end: EpisodeEnd,
}

/// Counters accumulated over a training run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Episodes played.
    pub episodes: usize,
    /// Transitions applied across all episodes.
    pub steps: usize,
    /// Episodes the maximizing player won.
    pub wins: usize,
    /// Episodes the maximizing player lost.
    pub losses: usize,
    /// Episodes ended by an illegal move.
    pub illegal_moves: usize,
    /// Episodes cut off by the step cap.
    pub truncated: usize,
    /// Episodes that started without a legal move.
    pub no_moves: usize,
    /// Sum of all episode rewards.
    pub total_reward: f64,
}

impl TrainingStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one episode into the counters.
    pub fn record(&mut self, summary: &EpisodeSummary, maximizing_player: PlayerId) {
        self.episodes += 1;
        self.steps += summary.steps;
        self.total_reward += summary.total_reward;

        match summary.end {
            EpisodeEnd::LastPieceTaken { loser } if loser == maximizing_player => self.losses += 1,
            EpisodeEnd::LastPieceTaken { .. } => self.wins += 1,
            EpisodeEnd::Illegal { .. } => self.illegal_moves += 1,
            EpisodeEnd::Truncated => self.truncated += 1,
            EpisodeEnd::NoMoves => self.no_moves += 1,
        }
    }

    /// Average episode reward over the whole run.
    #[must_use]
    pub fn score_over_time(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f64
        }
    }

    /// Fraction of decided games the maximizing player won.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            self.wins as f64 / decided as f64
        }
    }

    /// Average transitions per episode.
    #[must_use]
    pub fn avg_steps(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.steps as f64 / self.episodes as f64
        }
    }
}
