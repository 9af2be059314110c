//! MATLAB transfer file export
//!
//! The transfer file is a pretty-printed JSON document read (and deleted) by
//! the MATLAB side. It is persisted on creation and never cleaned up here.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::tree::ConfigTree;
use crate::domain::Implementation;

const TRANSFER_PREFIX: &str = "fastica_";
const TRANSFER_SUFFIX: &str = ".json";

/// Reduced configuration handed to MATLAB.
#[derive(Debug, Serialize)]
pub struct MatlabConfig<'a> {
    pub amica: &'a Value,
    pub implementation: Value,
    pub eeglab_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<&'a Value>,
}

impl<'a> MatlabConfig<'a> {
    pub fn build(tree: &'a ConfigTree, implementation: Implementation) -> Result<Self, ConfigError> {
        let project = if implementation.exports_project() {
            Some(tree.project_structure()?)
        } else {
            None
        };

        Ok(Self {
            amica: tree.amica_params()?,
            implementation: tree.implementation_or_empty(implementation)?,
            eeglab_path: tree.eeglab_path()?,
            project,
        })
    }
}

/// Write the transfer file for `implementation` and return its path.
///
/// The file lands in `dir` when given, otherwise in the system temp directory.
pub fn export_matlab_config(
    tree: &ConfigTree,
    implementation: Implementation,
    dir: Option<&Path>,
) -> Result<PathBuf> {
    let payload = MatlabConfig::build(tree, implementation)?;
    let bytes =
        serde_json::to_vec_pretty(&payload).context("Failed serializing MATLAB configuration")?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(TRANSFER_PREFIX).suffix(TRANSFER_SUFFIX);
    let mut file = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .context("Failed creating transfer file")?;

    file.write_all(&bytes).context("Failed writing transfer file")?;
    let (_, path) = file.keep().context("Failed persisting transfer file")?;

    tracing::info!("Exported {} configuration to {}", implementation, path.display());
    Ok(path)
}
