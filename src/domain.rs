//! Core domain types shared by the config and timing commands

use clap::ValueEnum;
use std::fmt;

/// Environment variable naming an override config file.
pub const CONFIG_ENV_VAR: &str = "FAST_ICA_CONFIG";

/// Environment variable naming the installation root.
pub const HOME_ENV_VAR: &str = "FAST_ICA_HOME";

/// Location of the base configuration relative to the installation root.
pub const DEFAULT_CONFIG_FILE: &str = "config/default.yml";

/// Named parameter bundle under the `implementations` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Implementation {
    Parallel,
    Serial,
    /// Also exports the project structure to MATLAB.
    Strengthen,
}

impl Implementation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Implementation::Parallel => "parallel",
            Implementation::Serial => "serial",
            Implementation::Strengthen => "strengthen",
        }
    }

    /// Whether the transfer file should carry `project.structure`.
    pub fn exports_project(&self) -> bool {
        matches!(self, Implementation::Strengthen)
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment environment used to key executable paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Environment {
    #[default]
    Local,
    Server,
    Container,
}

impl Environment {
    /// Key consulted when the requested environment has no entry.
    pub const FALLBACK: Environment = Environment::Local;

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Server => "server",
            Environment::Container => "container",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
