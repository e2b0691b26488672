//! CLI subcommands.

pub mod batch;
pub mod catalog;
pub mod process;

use std::path::Path;

use recarbo_core::RecarboConfig;

/// Load the pipeline configuration, falling back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RecarboConfig> {
    match config_path {
        Some(path) => Ok(RecarboConfig::from_file(Path::new(path))?),
        None => Ok(RecarboConfig::default()),
    }
}
