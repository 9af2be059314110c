//! Typed lookup failures for configuration accessors

use crate::domain::Implementation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing config key: {path}")]
    MissingKey { path: String },

    #[error("config key {path} must be a {expected}")]
    InvalidType { path: String, expected: &'static str },

    #[error("no configuration found for implementation: {0}")]
    UnknownImplementation(Implementation),
}

impl ConfigError {
    pub(crate) fn missing(path: &[&str]) -> Self {
        ConfigError::MissingKey { path: path.join(".") }
    }

    pub(crate) fn invalid(path: &[&str], expected: &'static str) -> Self {
        ConfigError::InvalidType { path: path.join("."), expected }
    }
}
