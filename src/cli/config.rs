//! Config command implementation

use anyhow::Result;
use clap::Args;
use serde_yaml::Value;
use std::path::PathBuf;

use crate::config::{default_config_path, export_matlab_config, load_config, ConfigTree};
use crate::domain::{Environment, Implementation, CONFIG_ENV_VAR, HOME_ENV_VAR};
use crate::logging::LogSession;

#[derive(Args)]
pub struct ConfigArgs {
    /// Implementation to get configuration for
    #[arg(short = 'i', long, value_enum, value_name = "NAME")]
    pub implementation: Option<Implementation>,

    /// Path to custom config file merged over the defaults
    #[arg(short = 'c', long, value_name = "FILE", env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Environment to use
    #[arg(short = 'e', long, value_enum, value_name = "ENV", default_value_t = Environment::Local)]
    pub env: Environment,

    /// Export configuration as MATLAB-readable JSON (requires --implementation)
    #[arg(short = 'm', long)]
    pub export_matlab: bool,

    /// Directory for the exported JSON file (defaults to the system temp dir)
    #[arg(long, value_name = "DIR", requires = "export_matlab")]
    pub export_dir: Option<PathBuf>,

    /// Print the MATLAB command line for the selected environment
    #[arg(long, conflicts_with = "export_matlab")]
    pub matlab_command: bool,

    /// Installation root containing config/default.yml
    #[arg(long, value_name = "DIR", env = HOME_ENV_VAR, default_value = ".")]
    pub root: PathBuf,

    /// Base configuration file (overrides <ROOT>/config/default.yml)
    #[arg(long, value_name = "FILE")]
    pub base_config: Option<PathBuf>,
}

pub fn run(args: ConfigArgs, verbose: bool) -> Result<()> {
    let base = args.base_config.clone().unwrap_or_else(|| default_config_path(&args.root));
    // An empty FAST_ICA_CONFIG counts as unset.
    let custom = args.config.as_deref().filter(|p| !p.as_os_str().is_empty());

    let tree = load_config(&base, custom)?;

    let session = LogSession::configured(&tree, &args.root, verbose);
    if let Some(path) = session.log_file() {
        tracing::debug!("Logging to {}", path.display());
    }
    tracing::info!("Configuration loaded for environment: {}", args.env);

    if args.matlab_command {
        println!("{}", matlab_command(&tree, args.env)?);
        return Ok(());
    }

    match args.implementation {
        Some(implementation) if args.export_matlab => {
            let path = export_matlab_config(&tree, implementation, args.export_dir.as_deref())?;
            println!("MATLAB configuration exported to: {}", path.display());
        }
        Some(implementation) => {
            let profile = tree.implementation_or_empty(implementation)?;
            if is_empty_profile(&profile) {
                print_yaml(&tree.to_yaml()?);
            } else {
                print_yaml(&serde_yaml::to_string(&profile)?);
            }
        }
        None => {
            if args.export_matlab {
                tracing::warn!("--export-matlab needs --implementation; printing configuration");
            }
            print_yaml(&tree.to_yaml()?);
        }
    }

    Ok(())
}

fn matlab_command(tree: &ConfigTree, env: Environment) -> Result<String> {
    let executable = tree.matlab_path(env)?;
    let options = tree.matlab_startup_options()?;
    Ok(format!("{} {}", executable, options).trim_end().to_string())
}

// False, zero, empty strings and empty collections fall back to the full tree.
fn is_empty_profile(profile: &Value) -> bool {
    match profile {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Mapping(m) => m.is_empty(),
        Value::Sequence(s) => s.is_empty(),
        Value::Tagged(tagged) => is_empty_profile(&tagged.value),
    }
}

fn print_yaml(yaml: &str) {
    print!("{}", yaml);
    if !yaml.ends_with('\n') {
        println!();
    }
}
