use std::path::PathBuf;

/// Errors raised by an environment.
///
/// Rule-breaking moves are not errors; they come back in-band as a
/// terminal step with the illegal-move penalty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error("cannot step before reset() or set_board()")]
    Uninitialized,

    #[error("malformed action {0}")]
    MalformedAction(String),

    #[error("no environment registered under '{0}'")]
    UnknownEnvironment(String),
}

/// Errors that can occur when loading training configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Convenience result type for environment operations.
pub type Result<T> = std::result::Result<T, EnvError>;
