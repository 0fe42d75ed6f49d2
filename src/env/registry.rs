//! Lookup of environments by string identifier.
//!
//! ```
//! use nim_rl::env::{make, Environment};
//!
//! let mut env = make("nim-v0").unwrap();
//! assert_eq!(env.reset().piles, [7, 5, 3]);
//! ```

use rustc_hash::FxHashMap;

use crate::error::{EnvError, Result};

use super::environment::Environment;
use super::nim::{NimEnv, NIM_ID};

/// Constructor for a registered environment.
pub type EnvFactory = fn() -> Box<dyn Environment>;

/// Registry of environment factories keyed by id.
#[derive(Clone, Debug)]
pub struct Registry {
    factories: FxHashMap<String, EnvFactory>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// Register a factory, replacing any previous one under the same id.
    pub fn register(&mut self, id: impl Into<String>, factory: EnvFactory) {
        self.factories.insert(id.into(), factory);
    }

    /// Instantiate the environment registered under `id`.
    pub fn make(&self, id: &str) -> Result<Box<dyn Environment>> {
        self.factories
            .get(id)
            .map(|factory| factory())
            .ok_or_else(|| EnvError::UnknownEnvironment(id.to_string()))
    }

    /// Check whether an id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for Registry {
    /// Registry with the built-in environments.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(NIM_ID, || Box::new(NimEnv::new()));
        registry
    }
}

/// Instantiate a built-in environment by id.
pub fn make(id: &str) -> Result<Box<dyn Environment>> {
    Registry::default().make(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_nim() {
        let env = make("nim-v0").unwrap();
        assert_eq!(env.id(), "nim-v0");
        assert!(!env.is_initialized());
    }

    #[test]
    fn test_make_unknown() {
        let err = make("chess-v0").err().unwrap();
        assert_eq!(err, EnvError::UnknownEnvironment("chess-v0".into()));
    }

    #[test]
    fn test_register_custom() {
        let mut registry = Registry::empty();
        assert!(!registry.contains("nim-v0"));
        assert!(registry.make("nim-v0").is_err());

        registry.register("my-nim", || Box::new(NimEnv::new()));
        assert!(registry.contains("my-nim"));
        assert_eq!(registry.ids(), vec!["my-nim"]);
        assert!(registry.make("my-nim").is_ok());
    }

    #[test]
    fn test_default_ids() {
        assert_eq!(Registry::default().ids(), vec!["nim-v0"]);
    }
}
