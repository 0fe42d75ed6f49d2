//! Game environments.
//!
//! Environments implement `Environment` to expose:
//! - State transitions with in-band illegal-move penalties
//! - Legal move enumeration
//! - Terminal detection and rewards
//!
//! The learner calls into `Environment` and never inspects game rules
//! directly. Environments are looked up by id through the `Registry`.

pub mod environment;
pub mod nim;
pub mod registry;

pub use environment::{Environment, IllegalMove, Step, StepOutcome};
pub use nim::{apply_move, check_move, EnvState, NimEnv, NIM_ID};
pub use registry::{make, EnvFactory, Registry};
