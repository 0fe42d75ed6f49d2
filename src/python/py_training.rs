//! Training bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{GameState, INITIAL_PILES, PILE_COUNT};
use crate::qlearn::{BootstrapRule, OpponentPolicyKind, QLearningConfig};
use crate::solver::Solver;
use crate::training::Trainer;

use super::py_env::env_err;

fn value_err(msg: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(msg.to_string())
}

/// Python wrapper for QLearningConfig.
#[pyclass(name = "QLearningConfig")]
#[derive(Clone)]
pub struct PyQLearningConfig(pub QLearningConfig);

#[pymethods]
impl PyQLearningConfig {
    /// Create a training configuration.
    ///
    /// # Arguments
    /// - learning_rate: Step size of the update (default: 0.85)
    /// - discount: Discount factor (default: 0.99)
    /// - num_episodes: Episodes to train (default: 10000)
    /// - max_steps: Move cap per episode (default: 99)
    /// - seed: RNG seed (default: 42)
    /// - opponent: "random" or "greedy" (default: "random")
    /// - bootstrap: "mover" or "next-player" (default: "mover")
    /// - start_piles: Fixed starting board, e.g. [2, 1, 1] (default: None)
    #[new]
    #[pyo3(signature = (
        learning_rate = 0.85,
        discount = 0.99,
        num_episodes = 10_000,
        max_steps = 99,
        seed = 42,
        opponent = "random",
        bootstrap = "mover",
        start_piles = None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        learning_rate: f64,
        discount: f64,
        num_episodes: usize,
        max_steps: usize,
        seed: u64,
        opponent: &str,
        bootstrap: &str,
        start_piles: Option<[u8; PILE_COUNT]>,
    ) -> PyResult<Self> {
        let opponent: OpponentPolicyKind = opponent.parse().map_err(value_err)?;
        let bootstrap: BootstrapRule = bootstrap.parse().map_err(value_err)?;

        let mut config = QLearningConfig::default()
            .with_learning_rate(learning_rate)
            .with_discount(discount)
            .with_episodes(num_episodes)
            .with_max_steps(max_steps)
            .with_seed(seed)
            .with_opponent(opponent)
            .with_bootstrap_rule(bootstrap);
        if let Some(piles) = start_piles {
            config = config.with_start_piles(piles);
        }
        config.validate().map_err(value_err)?;
        Ok(Self(config))
    }

    /// Load a TOML config file.
    #[staticmethod]
    fn load(path: &str) -> PyResult<Self> {
        QLearningConfig::load(std::path::Path::new(path))
            .map(Self)
            .map_err(value_err)
    }

    #[getter]
    fn learning_rate(&self) -> f64 {
        self.0.learning_rate
    }

    #[getter]
    fn discount(&self) -> f64 {
        self.0.discount
    }

    #[getter]
    fn num_episodes(&self) -> usize {
        self.0.num_episodes
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    fn __repr__(&self) -> String {
        format!(
            "QLearningConfig(lr={}, discount={}, episodes={}, opponent={}, bootstrap={})",
            self.0.learning_rate,
            self.0.discount,
            self.0.num_episodes,
            self.0.opponent_policy,
            self.0.bootstrap_rule
        )
    }
}

/// Train a Q-table.
///
/// Returns `(table, stats)`: a `(1024, 9)` float64 array and a dict with
/// the run's counters, score over time, and accuracy against perfect play
/// from the starting board.
#[pyfunction]
#[pyo3(signature = (config = None))]
pub fn train<'py>(
    py: Python<'py>,
    config: Option<PyQLearningConfig>,
) -> PyResult<(Bound<'py, PyArray2<f64>>, Bound<'py, PyDict>)> {
    let config = config.map(|c| c.0).unwrap_or_default();
    let start = config.start_piles.unwrap_or(INITIAL_PILES);
    let player = config.maximizing_player;

    let mut trainer = Trainer::nim(config);
    let report = py.allow_threads(|| trainer.run()).map_err(env_err)?;
    let table = trainer.into_table();

    let evaluation = Solver::new().evaluate(&table, start, player);

    let stats = PyDict::new_bound(py);
    stats.set_item("episodes", report.stats.episodes)?;
    stats.set_item("wins", report.stats.wins)?;
    stats.set_item("losses", report.stats.losses)?;
    stats.set_item("truncated", report.stats.truncated)?;
    stats.set_item("score_over_time", report.score_over_time)?;
    stats.set_item("rolling_average", report.final_rolling_average)?;
    stats.set_item("accuracy", evaluation.accuracy())?;

    let (rows, cols) = (table.rows(), table.cols());
    let array = PyArray1::from_vec_bound(py, table.values().to_vec())
        .reshape([rows, cols])?;
    Ok((array, stats))
}

/// Whether the player on move can force a win from `board`.
#[pyfunction]
pub fn is_winning(board: [u8; PILE_COUNT]) -> bool {
    Solver::new().is_winning(&GameState::new(board))
}
