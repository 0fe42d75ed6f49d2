//! Q-learning training parameters.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, MAX_PILE, PILE_COUNT};
use crate::error::ConfigError;

use super::policy::OpponentPolicyKind;
use super::table::BootstrapRule;

/// Training configuration, loadable from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Step size of the update rule.
    pub learning_rate: f64,

    /// Discount factor for the next state's value.
    pub discount: f64,

    /// Episodes to train for.
    pub num_episodes: usize,

    /// Safety cap on moves per episode.
    pub max_steps: usize,

    /// Episodes averaged for progress reports.
    pub rolling_window: usize,

    /// Report every this many episodes once the window is full.
    pub report_interval: usize,

    /// Seed for all training randomness.
    pub seed: u64,

    /// Player whose value the table represents.
    pub maximizing_player: PlayerId,

    /// How the other player moves.
    pub opponent_policy: OpponentPolicyKind,

    /// Which extreme of the next row each update bootstraps from.
    pub bootstrap_rule: BootstrapRule,

    /// Exploration noise multiplier, further annealed by `1 / (episode + 1)`.
    pub noise_scale: f64,

    /// Board to start every episode from instead of the reset position.
    pub start_piles: Option<[u8; PILE_COUNT]>,

    /// Log every non-zero table entry with each report.
    pub dump_table: bool,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.85,
            discount: 0.99,
            num_episodes: 10_000,
            max_steps: 99,
            rolling_window: 1000,
            report_interval: 500,
            seed: 42,
            maximizing_player: PlayerId::ONE,
            opponent_policy: OpponentPolicyKind::Random,
            bootstrap_rule: BootstrapRule::Mover,
            noise_scale: 1.0,
            start_piles: None,
            dump_table: false,
        }
    }
}

impl QLearningConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the learning rate.
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Set the discount factor.
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Set the number of episodes.
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.num_episodes = episodes;
        self
    }

    /// Set the per-episode step cap.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the rolling window size and report interval.
    pub fn with_reporting(mut self, window: usize, interval: usize) -> Self {
        self.rolling_window = window;
        self.report_interval = interval;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the maximizing player.
    pub fn with_maximizing_player(mut self, player: PlayerId) -> Self {
        self.maximizing_player = player;
        self
    }

    /// Set the opponent policy.
    pub fn with_opponent(mut self, policy: OpponentPolicyKind) -> Self {
        self.opponent_policy = policy;
        self
    }

    /// Set the bootstrap rule.
    pub fn with_bootstrap_rule(mut self, rule: BootstrapRule) -> Self {
        self.bootstrap_rule = rule;
        self
    }

    /// Set the exploration noise multiplier.
    pub fn with_noise_scale(mut self, scale: f64) -> Self {
        self.noise_scale = scale;
        self
    }

    /// Start every episode from a fixed board.
    pub fn with_start_piles(mut self, piles: [u8; PILE_COUNT]) -> Self {
        self.start_piles = Some(piles);
        self
    }

    /// Dump non-zero table entries with each report.
    pub fn with_table_dump(mut self, dump: bool) -> Self {
        self.dump_table = dump;
        self
    }

    /// Exploration noise multiplier for an episode.
    pub fn noise_for_episode(&self, episode: usize) -> f64 {
        self.noise_scale / (episode as f64 + 1.0)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: QLearningConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(ConfigError::Validation(
                "learning_rate must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(ConfigError::Validation("discount must be in [0, 1]".into()));
        }
        if self.num_episodes == 0 {
            return Err(ConfigError::Validation("num_episodes must be > 0".into()));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::Validation("max_steps must be > 0".into()));
        }
        if self.rolling_window == 0 {
            return Err(ConfigError::Validation("rolling_window must be > 0".into()));
        }
        if self.report_interval == 0 {
            return Err(ConfigError::Validation("report_interval must be > 0".into()));
        }
        if !self.noise_scale.is_finite() || self.noise_scale < 0.0 {
            return Err(ConfigError::Validation(
                "noise_scale must be finite and >= 0".into(),
            ));
        }
        if let Some(piles) = self.start_piles {
            if piles.iter().any(|&p| p > MAX_PILE) {
                return Err(ConfigError::Validation(format!(
                    "start_piles must each be <= {MAX_PILE}"
                )));
            }
        }
        Ok(())
    }
}
