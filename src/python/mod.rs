//! Python bindings for the Nim environment and Q-learning trainer.
//!
//! # Quick Start
//!
//! ```python
//! import nim_rl
//!
//! env = nim_rl.make("nim-v0")
//! obs = env.reset()
//! env.render()
//!
//! obs, reward, terminated, truncated, info = env.step([0, 2])
//! print(env.move_generator())
//!
//! config = nim_rl.QLearningConfig(num_episodes=5000, start_piles=[2, 1, 1])
//! table, stats = nim_rl.train(config)
//! ```

use pyo3::prelude::*;

mod py_env;
mod py_training;

pub use py_env::*;
pub use py_training::*;

/// nim_rl: a misère Nim environment and tabular Q-learning.
#[pymodule]
fn nim_rl(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Environment
    m.add_class::<PyNimEnv>()?;
    m.add_function(wrap_pyfunction!(make, m)?)?;

    // Training
    m.add_class::<PyQLearningConfig>()?;
    m.add_function(wrap_pyfunction!(train, m)?)?;
    m.add_function(wrap_pyfunction!(is_winning, m)?)?;

    Ok(())
}
