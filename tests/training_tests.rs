//! Integration tests for the training loop.

use nim_rl::core::{GameState, Move, PlayerId};
use nim_rl::env::NimEnv;
use nim_rl::qlearn::{BootstrapRule, MoveIndexer, OpponentPolicyKind, QLearningConfig, StateHasher};
use nim_rl::solver::Solver;
use nim_rl::training::{EpisodeEnd, Trainer};

fn quick_config(episodes: usize) -> QLearningConfig {
    QLearningConfig::default()
        .with_episodes(episodes)
        .with_reporting(50, 100)
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_same_seed_same_table() {
    let config = quick_config(200).with_seed(9);
    let mut a = Trainer::nim(config.clone());
    let mut b = Trainer::nim(config);

    let report_a = a.run().unwrap();
    let report_b = b.run().unwrap();

    assert_eq!(a.table(), b.table());
    assert_eq!(report_a.stats.wins, report_b.stats.wins);
    assert_eq!(report_a.score_over_time, report_b.score_over_time);
}

#[test]
fn test_different_seed_different_table() {
    let mut a = Trainer::nim(quick_config(200).with_seed(1));
    let mut b = Trainer::nim(quick_config(200).with_seed(2));
    a.run().unwrap();
    b.run().unwrap();

    assert_ne!(a.table(), b.table());
}

#[test]
fn test_generic_over_environment() {
    let mut trainer = Trainer::new(NimEnv::new(), quick_config(20));
    let report = trainer.run().unwrap();
    assert_eq!(report.stats.episodes, 20);
}

// =============================================================================
// Episode Tests
// =============================================================================

#[test]
fn test_every_game_is_decided() {
    let mut trainer = Trainer::nim(quick_config(300));
    let report = trainer.run().unwrap();

    assert_eq!(report.stats.wins + report.stats.losses, 300);
    assert_eq!(report.stats.illegal_moves, 0);
    assert_eq!(report.stats.truncated, 0);
    assert!(report.stats.avg_steps() >= 5.0);
    assert!(report.stats.avg_steps() <= 15.0);
}

#[test]
fn test_second_player_perspective() {
    let config = quick_config(1)
        .with_maximizing_player(PlayerId::TWO)
        .with_start_piles([1, 0, 0]);
    let mut trainer = Trainer::nim(config);

    let summary = trainer.run_episode(0).unwrap();
    assert_eq!(summary.end, EpisodeEnd::LastPieceTaken { loser: PlayerId::ONE });
    assert_eq!(summary.total_reward, 1.0);

    // Player 1's forced move is stored with the sign flipped.
    let row = StateHasher::hash(&GameState::new([1, 0, 0]));
    let col = MoveIndexer::to_index(Move::new(0, 1)).unwrap();
    assert!((trainer.table().get(row, col) - 0.85).abs() < 1e-12);
}

#[test]
fn test_rolling_window_bounded() {
    let mut trainer = Trainer::nim(quick_config(120));
    trainer.run().unwrap();

    let window = trainer.window();
    assert_eq!(window.len(), 50);
    let average = window.average().unwrap();
    assert!((-1.0..=1.0).contains(&average));
}

// =============================================================================
// Convergence Tests
// =============================================================================

#[test]
fn test_learns_winning_opening_from_small_board() {
    let config = QLearningConfig::default()
        .with_episodes(5000)
        .with_seed(7)
        .with_start_piles([2, 1, 1])
        .with_opponent(OpponentPolicyKind::Random)
        .with_bootstrap_rule(BootstrapRule::NextPlayer);
    let mut trainer = Trainer::nim(config);
    trainer.run().unwrap();

    let start = GameState::new([2, 1, 1]);
    let solver = Solver::new();
    let best = trainer.table().best_move(&start).unwrap();

    assert_eq!(solver.winning_moves(&start).as_slice(), &[Move::new(0, 1)]);
    assert_eq!(best, Move::new(0, 1));

    let row = trainer.table().row(StateHasher::hash(&start));
    assert!(row[0] > 0.0, "winning opening should have positive value");
    for mv in start.legal_moves().into_iter().filter(|&mv| mv != best) {
        let col = MoveIndexer::to_index(mv).unwrap();
        assert!(row[col] <= 0.0, "losing opening {mv} has a positive value");
    }
}

#[test]
fn test_learns_winning_opening_from_initial_board() {
    let config = QLearningConfig::default()
        .with_episodes(10_000)
        .with_seed(1)
        .with_opponent(OpponentPolicyKind::Random)
        .with_bootstrap_rule(BootstrapRule::NextPlayer);
    let mut trainer = Trainer::nim(config);
    trainer.run().unwrap();

    let initial = GameState::initial();
    let solver = Solver::new();
    let winning = solver.winning_moves(&initial);
    let best = trainer.table().best_move(&initial).unwrap();
    assert!(winning.contains(&best), "{best} is not a winning opening");

    let evaluation = solver.evaluate(trainer.table(), initial.piles, PlayerId::ONE);
    assert!(evaluation.positions > 0);
    assert!(
        evaluation.accuracy() > 0.9,
        "accuracy {:.3} over {} positions",
        evaluation.accuracy(),
        evaluation.positions
    );
}

#[test]
fn test_greedy_opponent_run_is_stable() {
    let config = quick_config(500)
        .with_opponent(OpponentPolicyKind::Greedy)
        .with_bootstrap_rule(BootstrapRule::NextPlayer)
        .with_start_piles([3, 2, 1]);
    let mut trainer = Trainer::nim(config);
    let report = trainer.run().unwrap();

    assert_eq!(report.stats.episodes, 500);
    assert!(trainer.table().values().iter().all(|v| v.is_finite()));
    assert!(trainer.table().values().iter().all(|v| v.abs() <= 1.0 + 1e-9));
}
