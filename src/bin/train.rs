use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use nim_rl::core::{GameState, INITIAL_PILES, PILE_COUNT};
use nim_rl::qlearn::{BootstrapRule, MoveIndexer, OpponentPolicyKind, QLearningConfig, StateHasher};
use nim_rl::solver::Solver;
use nim_rl::training::Trainer;

/// Train a tabular Q-learning agent on three-pile misère Nim.
#[derive(Parser)]
#[command(name = "train", about = "Train a Q-table for Nim")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "nim-rl.toml")]
    config: PathBuf,

    /// Override number of training episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Override learning rate
    #[arg(long)]
    lr: Option<f64>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Opponent policy: random or greedy
    #[arg(long)]
    opponent: Option<OpponentPolicyKind>,

    /// Bootstrap rule: mover or next-player
    #[arg(long)]
    bootstrap: Option<BootstrapRule>,

    /// Starting board for every episode, e.g. "2,1,1"
    #[arg(long)]
    board: Option<String>,

    /// Print every non-zero table entry at the end
    #[arg(long)]
    dump: bool,
}

fn parse_board(raw: &str) -> Result<[u8; PILE_COUNT]> {
    let piles = raw
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("parsing board '{raw}'"))?;
    match piles.as_slice() {
        &[a, b, c] => Ok([a, b, c]),
        _ => bail!("board '{raw}' must have exactly {PILE_COUNT} piles"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    // Load configuration
    let mut config = QLearningConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(episodes) = cli.episodes {
        config.num_episodes = episodes;
    }
    if let Some(lr) = cli.lr {
        config.learning_rate = lr;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(opponent) = cli.opponent {
        config.opponent_policy = opponent;
    }
    if let Some(bootstrap) = cli.bootstrap {
        config.bootstrap_rule = bootstrap;
    }
    if let Some(board) = cli.board.as_deref() {
        config.start_piles = Some(parse_board(board)?);
    }
    config.dump_table |= cli.dump;
    config.validate().context("invalid configuration")?;

    let start = config.start_piles.unwrap_or(INITIAL_PILES);
    let player = config.maximizing_player;
    let dump = config.dump_table;

    let mut trainer = Trainer::nim(config);
    let report = trainer.run().context("training failed")?;
    let table = trainer.into_table();

    println!("Score over time: {:.4}", report.score_over_time);
    if let Some(average) = report.final_rolling_average {
        println!("Final rolling average: {average:.4}");
    }
    println!(
        "Wins: {}  Losses: {}  Truncated: {}",
        report.stats.wins, report.stats.losses, report.stats.truncated
    );

    let solver = Solver::new();
    let evaluation = solver.evaluate(&table, start, player);
    info!(
        "greedy policy picks a winning move in {}/{} winning positions",
        evaluation.correct, evaluation.positions
    );
    println!("Accuracy vs perfect play: {:.2}%", evaluation.accuracy() * 100.0);

    let start_state = GameState::new(start).with_on_move(player);
    if let Some(mv) = table.best_move(&start_state) {
        let winning = solver.winning_moves(&start_state).contains(&mv);
        println!(
            "Preferred opening from {start:?}: {mv} ({})",
            if winning { "winning" } else { "not winning" }
        );
    }

    if dump {
        println!("Non-zero Q-table entries ({}):", table.nonzero_count());
        for (row, col, value) in table.nonzero() {
            let state = StateHasher::unhash(row);
            let mv = MoveIndexer::to_move(col).map_or_else(|| col.to_string(), |m| m.to_string());
            println!("{:?} {} {mv}: {value:.6}", state.piles, state.on_move);
        }
    }

    Ok(())
}
