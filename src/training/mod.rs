//! Training loop and progress monitoring.
//!
//! ## Overview
//!
//! - **Trainer**: plays episodes and applies Q-learning updates
//! - **RollingRewardWindow**: the last N episode rewards, for progress reports
//! - **TrainingStats**: win/loss counters and score over time
//!
//! ## Usage
//!
//! ```
//! use nim_rl::qlearn::QLearningConfig;
//! use nim_rl::training::Trainer;
//!
//! let config = QLearningConfig::default()
//!     .with_episodes(100)
//!     .with_reporting(10, 50);
//!
//! let mut trainer = Trainer::nim(config);
//! let report = trainer.run().unwrap();
//! assert_eq!(report.stats.episodes, 100);
//! ```

pub mod stats;
pub mod trainer;
pub mod window;

pub use stats::{EpisodeEnd, EpisodeSummary, TrainingStats};
pub use trainer::{Trainer, TrainingReport};
pub use window::RollingRewardWindow;
