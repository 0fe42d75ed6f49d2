//! Integration tests for table indexing, updates and move selection.

use nim_rl::core::{GameRng, GameState, Move, PlayerId};
use nim_rl::qlearn::{
    ActionSelector, Bootstrap, BootstrapRule, MoveIndexer, OpponentPolicyKind, QTable,
    StateHasher, Transition,
};
use nim_rl::solver::Solver;

fn transition(state: &GameState, mv: Move, reward: f64, next: &GameState, terminal: bool) -> Transition {
    Transition {
        state: StateHasher::hash(state),
        action: MoveIndexer::to_index(mv).unwrap(),
        reward,
        next_state: StateHasher::hash(next),
        terminal,
        bootstrap: Bootstrap::Max,
    }
}

// =============================================================================
// Indexing Tests
// =============================================================================

#[test]
fn test_every_move_has_a_column() {
    let mut seen = [false; 9];
    for mv in GameState::initial().legal_moves() {
        let col = MoveIndexer::to_index(mv).unwrap();
        assert!(!seen[col], "column {col} used twice");
        seen[col] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_moves_outside_scheme() {
    assert_eq!(MoveIndexer::to_index(Move::new(3, 1)), None);
    assert_eq!(MoveIndexer::to_index(Move::new(0, 0)), None);
    assert_eq!(MoveIndexer::to_index(Move::new(0, 4)), None);
    assert_eq!(MoveIndexer::to_move(9), None);
}

#[test]
fn test_hash_distinguishes_player() {
    let state = GameState::new([2, 1, 1]);
    let other = state.with_on_move(PlayerId::TWO);
    assert_ne!(StateHasher::hash(&state), StateHasher::hash(&other));
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_repeated_terminal_updates_converge() {
    let mut table = QTable::for_nim();
    let state = GameState::new([1, 0, 0]);
    let next = GameState::new([0, 0, 0]);
    let t = transition(&state, Move::new(0, 1), -1.0, &next, true);

    let first = table.update(&t, &[], 0.85, 0.99);
    assert!((first + 0.85).abs() < 1e-12);

    let second = table.update(&t, &[], 0.85, 0.99);
    assert!((second + 0.9775).abs() < 1e-12);

    for _ in 0..50 {
        table.update(&t, &[], 0.85, 0.99);
    }
    assert!((table.get(t.state, t.action) + 1.0).abs() < 1e-9);
}

#[test]
fn test_update_bootstraps_from_next_row() {
    let mut table = QTable::for_nim();
    let state = GameState::new([2, 0, 0]);
    let next = GameState::new([1, 0, 0]).with_on_move(PlayerId::TWO);
    let next_row = StateHasher::hash(&next);
    table.set(next_row, 0, 0.5);

    let t = transition(&state, Move::new(0, 1), 0.0, &next, false);
    let next_actions = MoveIndexer::columns(&next);
    let value = table.update(&t, &next_actions, 1.0, 0.9);
    assert!((value - 0.45).abs() < 1e-12);
}

#[test]
fn test_best_move_ignores_illegal_columns() {
    let mut table = QTable::for_nim();
    let state = GameState::new([0, 2, 0]);
    let row = StateHasher::hash(&state);
    // (0, 1) scores best but pile 0 is empty.
    table.set(row, 0, 5.0);
    table.set(row, 4, 1.0);

    assert_eq!(table.best_move(&state), Some(Move::new(1, 2)));
    assert_eq!(table.best_move(&GameState::new([0, 0, 0])), None);
}

#[test]
fn test_bootstrap_rule_choices() {
    let max = PlayerId::ONE;
    assert_eq!(BootstrapRule::default(), BootstrapRule::Mover);
    assert_eq!(BootstrapRule::Mover.for_mover(PlayerId::ONE, max), Bootstrap::Max);
    assert_eq!(BootstrapRule::NextPlayer.for_mover(PlayerId::ONE, max), Bootstrap::Min);
}

// =============================================================================
// Selector Tests
// =============================================================================

#[test]
fn test_selector_only_returns_legal_moves() {
    let selector = ActionSelector::new(PlayerId::ONE, OpponentPolicyKind::Greedy);
    let mut rng = GameRng::new(3);
    let state = GameState::new([1, 0, 2]);
    let legal = state.legal_moves();
    let mut row = [0.0; 9];
    row[0] = -3.0; // (0, 1)
    row[8] = 9.0; // (2, 3), not legal here

    for player in PlayerId::all() {
        for _ in 0..20 {
            let noise = rng.gaussian_noise(9, 0.5);
            let mv = selector.select(&row, &noise, &legal, player, &mut rng).unwrap();
            assert!(legal.contains(&mv));
        }
    }
}

#[test]
fn test_selector_greedy_without_noise() {
    let selector = ActionSelector::new(PlayerId::ONE, OpponentPolicyKind::Greedy);
    let mut rng = GameRng::new(3);
    let legal = GameState::new([2, 0, 1]).legal_moves();
    let mut row = [0.0; 9];
    row[0] = 1.0;
    row[1] = -1.0;
    row[6] = 0.5;

    let quiet = [0.0; 9];
    assert_eq!(
        selector.select(&row, &quiet, &legal, PlayerId::ONE, &mut rng),
        Some(Move::new(0, 1))
    );
    assert_eq!(
        selector.select(&row, &quiet, &legal, PlayerId::TWO, &mut rng),
        Some(Move::new(0, 2))
    );
}

#[test]
fn test_random_opponent_is_seeded() {
    let selector = ActionSelector::new(PlayerId::ONE, OpponentPolicyKind::Random);
    let legal = GameState::initial().legal_moves();
    let row = [0.0; 9];

    let picks = |seed| {
        let mut rng = GameRng::new(seed);
        (0..10)
            .map(|_| selector.select(&row, &row, &legal, PlayerId::TWO, &mut rng).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(picks(11), picks(11));
}

// =============================================================================
// Solver Tests
// =============================================================================

#[test]
fn test_solver_on_initial_board_is_consistent() {
    let solver = Solver::new();
    let initial = GameState::initial();
    let winning = solver.winning_moves(&initial);
    assert_eq!(solver.is_winning(&initial), !winning.is_empty());
    for mv in winning {
        assert!(initial.legal_moves().contains(&mv));
    }
}
