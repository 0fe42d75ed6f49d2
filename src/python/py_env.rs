//! Environment bindings for Python.

use numpy::PyArray1;
use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{GameState, PILE_COUNT};
use crate::env::{self, Environment, NimEnv, StepOutcome};
use crate::error::EnvError;

pub(crate) fn env_err(err: EnvError) -> PyErr {
    match err {
        EnvError::Uninitialized => PyErr::new::<PyRuntimeError, _>(err.to_string()),
        EnvError::MalformedAction(_) => PyErr::new::<PyValueError, _>(err.to_string()),
        EnvError::UnknownEnvironment(_) => PyErr::new::<PyKeyError, _>(err.to_string()),
    }
}

fn observation<'py>(py: Python<'py>, state: &GameState) -> PyResult<Bound<'py, PyDict>> {
    let board: Vec<i32> = state.piles.iter().map(|&p| i32::from(p)).collect();
    let dict = PyDict::new_bound(py);
    dict.set_item("board", PyArray1::from_vec_bound(py, board))?;
    dict.set_item("on_move", state.on_move.raw())?;
    Ok(dict)
}

/// Python wrapper for an environment.
///
/// Mirrors the gym interface: `reset`, `step`, `render`.
#[pyclass(name = "NimEnv", unsendable)]
pub struct PyNimEnv {
    inner: Box<dyn Environment>,
}

#[pymethods]
impl PyNimEnv {
    /// Create an uninitialized Nim environment.
    #[new]
    fn new() -> Self {
        Self {
            inner: Box::new(NimEnv::new()),
        }
    }

    /// Start a new game from 7, 5, 3 with player 1 to move.
    fn reset<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let state = self.inner.reset();
        observation(py, &state)
    }

    /// Apply `[pile, count]`.
    ///
    /// Returns `(observation, reward, terminated, truncated, info)`. Illegal
    /// moves end the game with reward -2; `info["illegal"]` says why.
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: Vec<i64>,
    ) -> PyResult<(Bound<'py, PyDict>, f64, bool, bool, Bound<'py, PyDict>)> {
        let step = self.inner.step_raw(&action).map_err(env_err)?;

        let info = PyDict::new_bound(py);
        match step.outcome {
            StepOutcome::Continue => {}
            StepOutcome::LastPieceTaken { loser } => info.set_item("loser", loser.raw())?,
            StepOutcome::Illegal(reason) => {
                println!("Illegal move {action:?}: {reason}");
                info.set_item("illegal", reason.to_string())?;
            }
        }

        Ok((
            observation(py, &step.state)?,
            step.reward,
            step.terminated,
            step.truncated,
            info,
        ))
    }

    /// Print the position and return the printed text.
    fn render(&self) -> String {
        let text = self.inner.render();
        println!("{text}");
        text
    }

    /// Override the pile sizes, keeping the player to move.
    fn set_board(&mut self, board: [u8; PILE_COUNT]) {
        self.inner.set_board(board);
    }

    /// Legal moves as `[pile, count]` lists; empty before reset.
    fn move_generator(&self) -> Vec<[i64; 2]> {
        self.inner
            .legal_moves()
            .into_iter()
            .map(|mv| mv.to_raw())
            .collect()
    }

    /// Current observation, or `None` before reset.
    #[getter]
    fn state<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyDict>>> {
        self.inner
            .state()
            .map(|state| observation(py, state))
            .transpose()
    }

    /// Size of the flat action space.
    #[getter]
    fn action_space(&self) -> usize {
        self.inner.spaces().actions
    }

    /// Size of the flat observation space.
    #[getter]
    fn observation_space(&self) -> usize {
        self.inner.spaces().observations
    }

    /// Registered id.
    #[getter]
    fn id(&self) -> String {
        self.inner.id().to_string()
    }

    fn __repr__(&self) -> String {
        match self.inner.state() {
            Some(state) => format!(
                "NimEnv(piles={:?}, on_move={})",
                state.piles,
                state.on_move.raw()
            ),
            None => "NimEnv(uninitialized)".to_string(),
        }
    }
}

/// Create a registered environment by id, e.g. `"nim-v0"`.
#[pyfunction]
pub fn make(id: &str) -> PyResult<PyNimEnv> {
    let inner = env::make(id).map_err(env_err)?;
    Ok(PyNimEnv { inner })
}
