//! fastica-tools: configuration and log utilities for the Fast ICA pipeline
//!
//! The `config` module loads the default YAML configuration, merges an
//! optional override and exports the subset MATLAB needs. The `timing` module
//! totals the elapsed-time tokens AMICA writes to its logs.

pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod timing;
