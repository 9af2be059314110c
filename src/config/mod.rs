//! Configuration loading, merging and export
//!
//! A mandatory base document is loaded first and an optional override is
//! deep-merged on top (override wins). The merged tree feeds the MATLAB side
//! either through accessors or through an exported transfer file.

pub mod error;
pub mod export;
pub mod loader;
pub mod merge;
pub mod tree;

pub use error::ConfigError;
pub use export::{export_matlab_config, MatlabConfig};
pub use loader::{default_config_path, load_config};
pub use merge::deep_merge;
pub use tree::ConfigTree;
