//! Merged configuration tree and its accessors
//!
//! Every accessor returns `Result<_, ConfigError>`; callers decide whether a
//! missing key is fatal.

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};

use super::error::ConfigError;
use super::merge::deep_merge;
use crate::domain::{Environment, Implementation};

const MATLAB_PATH: [&str; 2] = ["global", "matlab"];
const AMICA_PATH: [&str; 2] = ["global", "amica"];
const EEGLAB_PATH: [&str; 3] = ["global", "eeglab", "path"];
const STARTUP_OPTIONS_PATH: [&str; 3] = ["global", "eeglab", "startup_options"];
const PROJECT_STRUCTURE_PATH: [&str; 2] = ["project", "structure"];
const IMPLEMENTATIONS_KEY: &str = "implementations";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    root: Mapping,
}

impl ConfigTree {
    pub fn new(root: Mapping) -> Self {
        Self { root }
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    /// Merge an override document on top of this tree.
    pub fn merge(&mut self, overlay: &Mapping) {
        deep_merge(&mut self.root, overlay);
    }

    /// Look up the value at a dotted path given as its segments.
    pub fn section(&self, path: &[&str]) -> Result<&Value, ConfigError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(ConfigError::missing(path));
        };

        let mut current = &self.root;
        for (depth, key) in parents.iter().enumerate() {
            let value = current.get(*key).ok_or_else(|| ConfigError::missing(&path[..=depth]))?;
            current = value
                .as_mapping()
                .ok_or_else(|| ConfigError::invalid(&path[..=depth], "mapping"))?;
        }
        current.get(*last).ok_or_else(|| ConfigError::missing(path))
    }

    fn string_at(&self, path: &[&str]) -> Result<&str, ConfigError> {
        self.section(path)?.as_str().ok_or_else(|| ConfigError::invalid(path, "string"))
    }

    /// MATLAB executable for `env`, falling back to the `local` entry.
    pub fn matlab_path(&self, env: Environment) -> Result<&str, ConfigError> {
        let entries = self
            .section(&MATLAB_PATH)?
            .as_mapping()
            .ok_or_else(|| ConfigError::invalid(&MATLAB_PATH, "mapping"))?;

        let chosen = if entries.contains_key(env.as_str()) { env } else { Environment::FALLBACK };
        if chosen != env {
            tracing::debug!("No MATLAB path for environment {}, using {}", env, chosen);
        }

        let path = [MATLAB_PATH[0], MATLAB_PATH[1], chosen.as_str()];
        let value = entries.get(chosen.as_str()).ok_or_else(|| ConfigError::missing(&path))?;
        value.as_str().ok_or_else(|| ConfigError::invalid(&path, "string"))
    }

    pub fn eeglab_path(&self) -> Result<&str, ConfigError> {
        self.string_at(&EEGLAB_PATH)
    }

    pub fn matlab_startup_options(&self) -> Result<&str, ConfigError> {
        self.string_at(&STARTUP_OPTIONS_PATH)
    }

    pub fn amica_params(&self) -> Result<&Value, ConfigError> {
        self.section(&AMICA_PATH)
    }

    pub fn project_structure(&self) -> Result<&Value, ConfigError> {
        self.section(&PROJECT_STRUCTURE_PATH)
    }

    /// Profile for `implementation` under the `implementations` section.
    pub fn implementation(&self, implementation: Implementation) -> Result<&Value, ConfigError> {
        let profiles = self
            .section(&[IMPLEMENTATIONS_KEY])?
            .as_mapping()
            .ok_or_else(|| ConfigError::invalid(&[IMPLEMENTATIONS_KEY], "mapping"))?;

        profiles
            .get(implementation.as_str())
            .ok_or(ConfigError::UnknownImplementation(implementation))
    }

    /// Like [`ConfigTree::implementation`] but an unknown profile yields an
    /// empty mapping with a warning. A missing `implementations` section is
    /// still an error.
    pub fn implementation_or_empty(
        &self,
        implementation: Implementation,
    ) -> Result<Value, ConfigError> {
        match self.implementation(implementation) {
            Ok(profile) => Ok(profile.clone()),
            Err(ConfigError::UnknownImplementation(name)) => {
                tracing::warn!("No configuration found for implementation: {}", name);
                Ok(Value::Mapping(Mapping::new()))
            }
            Err(e) => Err(e),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.root).context("Failed serializing configuration to YAML")
    }
}
