//! Q-learning training loop.
//!
//! Plays episodes against the configured opponent, updating the table after
//! every move. Both players' transitions are learned from; the opponent's
//! rewards are negated so the table stays in the maximizing player's terms.

use log::{info, trace};

use crate::core::{GameRng, GameState};
use crate::env::{Environment, NimEnv, StepOutcome};
use crate::error::{EnvError, Result};
use crate::qlearn::{ActionSelector, MoveIndexer, QLearningConfig, QTable, StateHasher, Transition};

use super::stats::{EpisodeEnd, EpisodeSummary, TrainingStats};
use super::window::RollingRewardWindow;

/// Outcome of a full training run.
#[derive(Clone, Debug)]
pub struct TrainingReport {
    /// Counters over all episodes.
    pub stats: TrainingStats,
    /// Rolling average at the end of the run, `None` if nothing was played.
    pub final_rolling_average: Option<f64>,
    /// Average episode reward over the whole run.
    pub score_over_time: f64,
}

/// Runs Q-learning episodes on an environment.
pub struct Trainer<E: Environment> {
    env: E,
    config: QLearningConfig,
    selector: ActionSelector,
    table: QTable,
    window: RollingRewardWindow,
    stats: TrainingStats,
    rng: GameRng,
}

impl Trainer<NimEnv> {
    /// Trainer on a fresh Nim environment.
    pub fn nim(config: QLearningConfig) -> Self {
        Self::new(NimEnv::new(), config)
    }
}

impl<E: Environment> Trainer<E> {
    /// Create a trainer. The table is sized from the environment's spaces.
    ///
    /// # Panics
    /// Panics if `config.rolling_window` is zero; call
    /// [`QLearningConfig::validate`] first for untrusted configs.
    pub fn new(env: E, config: QLearningConfig) -> Self {
        let spaces = env.spaces();
        Self {
            selector: ActionSelector::new(config.maximizing_player, config.opponent_policy),
            table: QTable::new(spaces.observations, spaces.actions),
            window: RollingRewardWindow::new(config.rolling_window),
            stats: TrainingStats::new(),
            rng: GameRng::new(config.seed),
            env,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    /// The table learned so far.
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Take the learned table.
    pub fn into_table(self) -> QTable {
        self.table
    }

    /// Counters so far.
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Recent episode rewards.
    pub fn window(&self) -> &RollingRewardWindow {
        &self.window
    }

    /// Run every configured episode.
    pub fn run(&mut self) -> Result<TrainingReport> {
        info!(
            "training {} episodes (lr={}, discount={}, opponent={}, bootstrap={}, seed={})",
            self.config.num_episodes,
            self.config.learning_rate,
            self.config.discount,
            self.config.opponent_policy,
            self.config.bootstrap_rule,
            self.rng.seed()
        );

        for episode in 0..self.config.num_episodes {
            let summary = self.run_episode(episode)?;
            self.window.push(summary.total_reward);
            self.stats.record(&summary, self.config.maximizing_player);

            if self.window.is_full() && episode % self.config.report_interval == 0 {
                self.report(episode);
            }
        }

        let report = TrainingReport {
            stats: self.stats.clone(),
            final_rolling_average: self.window.average(),
            score_over_time: self.stats.score_over_time(),
        };
        info!(
            "score over time: {:.4} (wins {}, losses {}, truncated {})",
            report.score_over_time, report.stats.wins, report.stats.losses, report.stats.truncated
        );
        Ok(report)
    }

    /// Play and learn from a single episode.
    ///
    /// `episode` only sets the exploration noise scale.
    pub fn run_episode(&mut self, episode: usize) -> Result<EpisodeSummary> {
        let mut state = self.start_state()?;
        let maximizing = self.config.maximizing_player;
        let noise_scale = self.config.noise_for_episode(episode);

        let mut total_reward = 0.0;
        let mut steps = 0;
        let mut end = EpisodeEnd::Truncated;

        for _ in 0..self.config.max_steps {
            let row = StateHasher::hash(&state);
            let noise = self.rng.gaussian_noise(self.table.cols(), noise_scale);
            let legal = self.env.legal_moves();
            let mover = state.on_move;

            let Some(mv) = self
                .selector
                .select(self.table.row(row), &noise, &legal, mover, &mut self.rng)
            else {
                end = EpisodeEnd::NoMoves;
                break;
            };
            let action = MoveIndexer::to_index(mv)
                .ok_or_else(|| EnvError::MalformedAction(mv.to_string()))?;

            let step = self.env.step(mv)?;
            let reward = if mover == maximizing {
                step.reward
            } else {
                -step.reward
            };

            let transition = Transition {
                state: row,
                action,
                reward,
                next_state: StateHasher::hash(&step.state),
                terminal: step.terminated,
                bootstrap: self.config.bootstrap_rule.for_mover(mover, maximizing),
            };
            let next_actions = MoveIndexer::columns(&step.state);
            let value = self.table.update(
                &transition,
                &next_actions,
                self.config.learning_rate,
                self.config.discount,
            );
            trace!("{mover} played {mv} at row {row}: reward {reward}, Q -> {value:.4}");

            total_reward += reward;
            steps += 1;
            state = step.state;

            if step.terminated {
                end = match step.outcome {
                    StepOutcome::LastPieceTaken { loser } => EpisodeEnd::LastPieceTaken { loser },
                    StepOutcome::Illegal(reason) => EpisodeEnd::Illegal { by: mover, reason },
                    StepOutcome::Continue => EpisodeEnd::Truncated,
                };
                break;
            }
        }

        Ok(EpisodeSummary {
            episode,
            steps,
            total_reward,
            end,
        })
    }

    fn start_state(&mut self) -> Result<GameState> {
        let state = self.env.reset();
        match self.config.start_piles {
            Some(piles) => {
                self.env.set_board(piles);
                self.env.state().copied().ok_or(EnvError::Uninitialized)
            }
            None => Ok(state),
        }
    }

    fn report(&self, episode: usize) {
        if let Some(average) = self.window.average() {
            info!(
                "episode {episode}: rolling average over {} episodes = {average:.4}",
                self.window.len()
            );
        }
        if self.config.dump_table {
            info!("{} non-zero table entries", self.table.nonzero_count());
            for (state, action, value) in self.table.nonzero() {
                info!("  Q[{state}, {action}] = {value:.6}");
            }
        }
    }
}
