use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use nim_rl::core::{GameRng, PlayerId};
use nim_rl::env::{self, StepOutcome, NIM_ID};

/// Play random Nim games, rendering every position.
#[derive(Parser)]
#[command(name = "random_play", about = "Random self-play on the Nim environment")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 2000)]
    episodes: usize,

    /// Move cap per game
    #[arg(long, default_value_t = 10)]
    max_steps: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Only print the summary
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut env = env::make(NIM_ID).context("creating environment")?;
    let mut rng = GameRng::new(cli.seed);
    let mut total = 0.0;

    for episode in 0..cli.episodes {
        let state = env.reset();
        if !cli.quiet {
            println!("{state:?}");
            println!("starting new episode");
            println!("{}", env.render());
        }

        let mut episode_reward = 0.0;
        let mut steps = 0;
        for _ in 0..cli.max_steps {
            let moves = env.legal_moves();
            let Some(&mv) = rng.choose(&moves) else {
                debug!("out of moves");
                break;
            };
            let mover = env.state().map(|s| s.on_move).unwrap_or_default();

            let step = env.step(mv).context("stepping environment")?;
            let reward = if mover == PlayerId::TWO {
                -step.reward
            } else {
                step.reward
            };
            episode_reward += reward;
            steps += 1;

            if !cli.quiet {
                println!("{mover} takes {mv}");
                println!("{}", env.render());
            }
            if step.terminated {
                if let (false, StepOutcome::LastPieceTaken { loser }) = (cli.quiet, step.outcome) {
                    println!("game over: {loser} took the last piece");
                }
                break;
            }
        }

        total += episode_reward;
        if !cli.quiet {
            println!("total reward {episode_reward} after episode {episode}, steps: {steps}");
        }
    }

    let average = if cli.episodes == 0 {
        0.0
    } else {
        total / cli.episodes as f64
    };
    println!("average score: {average:.4}");
    Ok(())
}
