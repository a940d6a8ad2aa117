//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod outputs;
pub mod process;

use std::path::Path;

use docex_core::DocexConfig;
use tracing::debug;

/// Load the config given on the command line, else the user config file if
/// present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DocexConfig> {
    if let Some(path) = config_path {
        return Ok(DocexConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(DocexConfig::from_file(&default_path)?)
    } else {
        Ok(DocexConfig::default())
    }
}
