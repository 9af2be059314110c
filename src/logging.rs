//! Scoped tracing setup
//!
//! A [`LogSession`] installs a subscriber for the current thread and removes
//! it when dropped. The bootstrap session only writes to stderr; once the
//! configuration is loaded a second session may add a file layer described by
//! the `logging` section of the tree.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ConfigTree;

const LOGGING_KEY: &str = "logging";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The `logging` section of the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub log_dir: Option<String>,
    pub file_format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            log_dir: None,
            file_format: "fastica_{timestamp}.log".to_string(),
        }
    }
}

impl LoggingSettings {
    /// Read settings from the tree; `None` when there is no `logging` section.
    pub fn from_tree(tree: &ConfigTree) -> Result<Option<Self>> {
        match tree.as_mapping().get(LOGGING_KEY) {
            None => Ok(None),
            Some(value) => serde_yaml::from_value(value.clone())
                .map(Some)
                .context("Invalid logging section in configuration"),
        }
    }

    /// Log file path under `root`, with `{timestamp}` expanded.
    pub fn log_file(&self, root: &Path, timestamp: &str) -> Option<PathBuf> {
        let dir = self.log_dir.as_deref().filter(|d| !d.is_empty())?;
        let name = self.file_format.replace("{timestamp}", timestamp);
        Some(root.join(dir).join(name))
    }
}

/// Map a logging level name (`DEBUG`, `INFO`, `WARNING`, ...) to a tracing level.
pub fn parse_level(name: &str) -> Result<Level> {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" | "CRITICAL" | "FATAL" => Ok(Level::ERROR),
        other => anyhow::bail!("Unknown log level '{}'", other),
    }
}

/// An installed subscriber; dropping it restores the previous one.
pub struct LogSession {
    _guard: DefaultGuard,
    log_file: Option<PathBuf>,
}

impl LogSession {
    /// Stderr-only logging used until the configuration is available.
    pub fn bootstrap(verbose: bool) -> Self {
        let guard = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_filter(stderr_filter(verbose)))
            .set_default();
        Self { _guard: guard, log_file: None }
    }

    /// Stderr logging plus, when configured, a file layer under `root`.
    ///
    /// Failing to open the log file is not fatal: the session falls back to
    /// stderr only and reports the problem there.
    pub fn configured(tree: &ConfigTree, root: &Path, verbose: bool) -> Self {
        match Self::try_configured(tree, root, verbose) {
            Ok(session) => session,
            Err(e) => {
                let session = Self::bootstrap(verbose);
                tracing::warn!("File logging disabled: {:#}", e);
                session
            }
        }
    }

    fn try_configured(tree: &ConfigTree, root: &Path, verbose: bool) -> Result<Self> {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        let settings = LoggingSettings::from_tree(tree)?;
        let target = match &settings {
            Some(settings) => match settings.log_file(root, &timestamp) {
                Some(path) => Some((path, parse_level(&settings.level)?)),
                None => None,
            },
            None => None,
        };

        let file_layer = match &target {
            Some((path, level)) => {
                if let Some(dir) = path.parent() {
                    fs::create_dir_all(dir).with_context(|| {
                        format!("Failed creating log directory: {}", dir.display())
                    })?;
                }
                // Appends so runs sharing a file name keep earlier output.
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed opening log file: {}", path.display()))?;
                Some(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_filter(LevelFilter::from_level(*level)),
                )
            }
            None => None,
        };

        let guard = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_filter(stderr_filter(verbose)))
            .with(file_layer)
            .set_default();

        Ok(Self { _guard: guard, log_file: target.map(|(path, _)| path) })
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

// RUST_LOG always takes precedence; --verbose falls back to DEBUG.
fn stderr_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::from_default_env().add_directive(level.into())
}
