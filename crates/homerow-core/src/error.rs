//! Error types for HomeRow.

use thiserror::Error;

/// Core error type for all HomeRow operations.
///
/// Channel factories and the locale gate never surface these: they fail
/// closed instead. Errors only cross the collaborator seams and config I/O.
#[derive(Error, Debug)]
pub enum HomeRowError {
    #[error("Experiment provider unavailable: {0}")]
    ExperimentUnavailable(String),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HomeRowError>;
