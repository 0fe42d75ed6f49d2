//! Move selection from noisy table scores.
//!
//! Policies are trait-based, like the learner's other seams:
//! - `GreedyMax`: highest score among legal moves
//! - `GreedyMin`: lowest score among legal moves
//! - `UniformRandom`: any legal move, ignoring scores
//!
//! `ActionSelector` decides which policy applies to the player on move.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Move, PlayerId};

use super::hashing::MoveIndexer;

/// Policy for picking one of several legal moves.
pub trait MovePolicy {
    /// Choose a move given per-column scores.
    ///
    /// Returns `None` if `legal` is empty.
    fn choose(&self, scores: &[f64], legal: &[Move], rng: &mut GameRng) -> Option<Move>;
}

/// Pick the legal move with the highest score; the first one wins ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyMax;

impl MovePolicy for GreedyMax {
    fn choose(&self, scores: &[f64], legal: &[Move], _rng: &mut GameRng) -> Option<Move> {
        pick_extreme(scores, legal, |candidate, best| candidate > best)
    }
}

/// Pick the legal move with the lowest score; the first one wins ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyMin;

impl MovePolicy for GreedyMin {
    fn choose(&self, scores: &[f64], legal: &[Move], _rng: &mut GameRng) -> Option<Move> {
        pick_extreme(scores, legal, |candidate, best| candidate < best)
    }
}

/// Pick uniformly among legal moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformRandom;

impl MovePolicy for UniformRandom {
    fn choose(&self, _scores: &[f64], legal: &[Move], rng: &mut GameRng) -> Option<Move> {
        rng.choose(legal).copied()
    }
}

fn pick_extreme(scores: &[f64], legal: &[Move], better: impl Fn(f64, f64) -> bool) -> Option<Move> {
    let mut best: Option<(Move, f64)> = None;
    for &mv in legal {
        let score = MoveIndexer::to_index(mv)
            .and_then(|col| scores.get(col).copied())
            .unwrap_or(f64::NAN);
        match best {
            None => best = Some((mv, score)),
            Some((_, best_score)) if better(score, best_score) || best_score.is_nan() => {
                best = Some((mv, score));
            }
            Some(_) => {}
        }
    }
    best.map(|(mv, _)| mv)
}

/// How the non-maximizing player moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentPolicyKind {
    /// Uniformly random legal moves.
    #[default]
    Random,
    /// Lowest-scoring legal move (minimizer).
    Greedy,
}

impl std::str::FromStr for OpponentPolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "greedy" => Ok(Self::Greedy),
            other => Err(format!("unknown opponent policy '{other}' (expected 'random' or 'greedy')")),
        }
    }
}

impl std::fmt::Display for OpponentPolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Greedy => write!(f, "greedy"),
        }
    }
}

/// Chooses moves for both players during training.
///
/// The maximizing player plays greedily on `row + noise`; the other player
/// follows the configured opponent policy. A single legal move is
/// returned without scoring.
#[derive(Clone, Copy, Debug)]
pub struct ActionSelector {
    maximizing_player: PlayerId,
    opponent: OpponentPolicyKind,
}

impl ActionSelector {
    /// Create a selector.
    #[must_use]
    pub fn new(maximizing_player: PlayerId, opponent: OpponentPolicyKind) -> Self {
        Self {
            maximizing_player,
            opponent,
        }
    }

    /// The player whose value the table represents.
    #[must_use]
    pub fn maximizing_player(&self) -> PlayerId {
        self.maximizing_player
    }

    /// Policy used for the non-maximizing player.
    #[must_use]
    pub fn opponent(&self) -> OpponentPolicyKind {
        self.opponent
    }

    /// Pick a move for `on_move`.
    ///
    /// `row` is the table row for the current state and `noise` the
    /// exploration perturbation for this decision (same length as `row`).
    /// Returns `None` when there is no legal move.
    pub fn select(
        &self,
        row: &[f64],
        noise: &[f64],
        legal: &[Move],
        on_move: PlayerId,
        rng: &mut GameRng,
    ) -> Option<Move> {
        match legal {
            [] => return None,
            [only] => return Some(*only),
            _ => {}
        }

        let scores: Vec<f64> = row
            .iter()
            .zip(noise.iter().chain(std::iter::repeat(&0.0)))
            .map(|(q, n)| q + n)
            .collect();

        if on_move == self.maximizing_player {
            GreedyMax.choose(&scores, legal, rng)
        } else {
            match self.opponent {
                OpponentPolicyKind::Random => UniformRandom.choose(&scores, legal, rng),
                OpponentPolicyKind::Greedy => GreedyMin.choose(&scores, legal, rng),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(raw: &[(usize, u8)]) -> Vec<Move> {
        raw.iter().map(|&(p, c)| Move::new(p, c)).collect()
    }

    #[test]
    fn test_greedy_max_picks_highest_legal() {
        let mut rng = GameRng::new(1);
        let mut scores = vec![0.0; 9];
        scores[1] = 3.0; // (0, 2), not legal below
        scores[4] = 2.0; // (1, 2)
        scores[6] = 1.0; // (2, 1)

        let legal = moves(&[(0, 1), (1, 2), (2, 1)]);
        assert_eq!(GreedyMax.choose(&scores, &legal, &mut rng), Some(Move::new(1, 2)));
    }

    #[test]
    fn test_greedy_ties_break_first() {
        let mut rng = GameRng::new(1);
        let scores = vec![0.0; 9];
        let legal = moves(&[(1, 1), (0, 1), (2, 1)]);
        assert_eq!(GreedyMax.choose(&scores, &legal, &mut rng), Some(Move::new(1, 1)));
        assert_eq!(GreedyMin.choose(&scores, &legal, &mut rng), Some(Move::new(1, 1)));
    }

    #[test]
    fn test_greedy_min_picks_lowest_legal() {
        let mut rng = GameRng::new(1);
        let mut scores = vec![0.0; 9];
        scores[0] = -1.0;
        scores[8] = -2.0;
        let legal = moves(&[(0, 1), (2, 3)]);
        assert_eq!(GreedyMin.choose(&scores, &legal, &mut rng), Some(Move::new(2, 3)));
    }

    #[test]
    fn test_uniform_random_stays_legal() {
        let mut rng = GameRng::new(7);
        let legal = moves(&[(0, 1), (1, 2), (2, 3)]);
        let mut seen = [false; 3];
        for _ in 0..100 {
            let mv = UniformRandom.choose(&[], &legal, &mut rng).unwrap();
            let i = legal.iter().position(|&m| m == mv).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_policies_on_empty() {
        let mut rng = GameRng::new(1);
        assert_eq!(GreedyMax.choose(&[0.0; 9], &[], &mut rng), None);
        assert_eq!(GreedyMin.choose(&[0.0; 9], &[], &mut rng), None);
        assert_eq!(UniformRandom.choose(&[0.0; 9], &[], &mut rng), None);
    }

    #[test]
    fn test_selector_no_moves() {
        let selector = ActionSelector::new(PlayerId::ONE, OpponentPolicyKind::Random);
        let mut rng = GameRng::new(1);
        assert_eq!(
            selector.select(&[0.0; 9], &[0.0; 9], &[], PlayerId::ONE, &mut rng),
            None
        );
    }

    #[test]
    fn test_selector_single_move_skips_scoring() {
        let selector = ActionSelector::new(PlayerId::ONE, OpponentPolicyKind::Greedy);
        let mut rng = GameRng::new(1);
        let only = [Move::new(2, 1)];
        for player in PlayerId::all() {
            assert_eq!(
                selector.select(&[0.0; 9], &[0.0; 9], &only, player, &mut rng),
                Some(Move::new(2, 1))
            );
        }
    }

    #[test]
    fn test_selector_noise_changes_argmax() {
        let selector = ActionSelector::new(PlayerId::ONE, OpponentPolicyKind::Random);
        let mut rng = GameRng::new(1);
        let legal = moves(&[(0, 1), (0, 2)]);
        let row = [1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

        let quiet = [0.0; 9];
        let loud = [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(
            selector.select(&row, &quiet, &legal, PlayerId::ONE, &mut rng),
            Some(Move::new(0, 1))
        );
        assert_eq!(
            selector.select(&row, &loud, &legal, PlayerId::ONE, &mut rng),
            Some(Move::new(0, 2))
        );
    }

    #[test]
    fn test_selector_greedy_opponent_minimizes() {
        let selector = ActionSelector::new(PlayerId::ONE, OpponentPolicyKind::Greedy);
        let mut rng = GameRng::new(1);
        let legal = moves(&[(0, 1), (0, 2)]);
        let row = [1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(
            selector.select(&row, &[0.0; 9], &legal, PlayerId::TWO, &mut rng),
            Some(Move::new(0, 2))
        );
    }

    #[test]
    fn test_opponent_kind_parse() {
        assert_eq!("random".parse::<OpponentPolicyKind>(), Ok(OpponentPolicyKind::Random));
        assert_eq!("Greedy".parse::<OpponentPolicyKind>(), Ok(OpponentPolicyKind::Greedy));
        assert!("minimax".parse::<OpponentPolicyKind>().is_err());
        assert_eq!(OpponentPolicyKind::Greedy.to_string(), "greedy");
    }
}
