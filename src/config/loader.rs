//! Config file loading

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::tree::ConfigTree;
use crate::domain::DEFAULT_CONFIG_FILE;

/// Base configuration location under an installation root.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_CONFIG_FILE)
}

/// Load the base document and merge an optional override on top.
///
/// The base document is mandatory: any failure to read or parse it is
/// returned to the caller. A broken override is logged and skipped, leaving
/// the base tree as loaded.
pub fn load_config(base_path: &Path, override_path: Option<&Path>) -> Result<ConfigTree> {
    let base = read_mapping(base_path)
        .with_context(|| format!("Error loading default config: {}", base_path.display()))?;
    let mut tree = ConfigTree::new(base);
    tracing::debug!("Loaded default configuration from {}", base_path.display());

    if let Some(path) = override_path {
        match read_mapping(path) {
            Ok(overlay) => {
                tree.merge(&overlay);
                tracing::debug!("Loaded custom configuration from {}", path.display());
            }
            Err(e) => {
                tracing::error!("Error loading custom config from {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(tree)
}

fn read_mapping(path: &Path) -> Result<Mapping> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading config file: {}", path.display()))?;

    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid YAML syntax: {}", path.display()))?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => anyhow::bail!("Config document is empty: {}", path.display()),
        other => anyhow::bail!(
            "Config document must be a mapping, found {}: {}",
            kind(&other),
            path.display()
        ),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
