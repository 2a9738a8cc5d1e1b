#![forbid(unsafe_code)]

//! Tapline error model.
//!
//! Recognition, dispatch and selection never fail: misses and out-of-range
//! positions are ordinary outcomes. Errors only arise at the edges, when a
//! persisted selection is restored or a configuration file is loaded.

use std::fmt;

use tapline_selection::PersistError;

use crate::config::ConfigError;

/// Top-level error type for Tapline hosts.
#[derive(Debug)]
pub enum Error {
    /// A persisted selection record failed validation.
    Persist(PersistError),
    /// Configuration could not be loaded or is invalid.
    Config(ConfigError),
}

/// Standard result type for Tapline APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Short label for logs and metrics.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Persist(_) => "persist",
            Self::Config(ConfigError::Io(_)) => "config_io",
            Self::Config(ConfigError::Validation(_)) => "config_validation",
            #[cfg(feature = "config")]
            Self::Config(ConfigError::Toml(_) | ConfigError::Json(_)) => "config_parse",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persist(e) => write!(f, "selection restore: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persist(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<PersistError> for Error {
    fn from(err: PersistError) -> Self {
        Self::Persist(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
