pub mod config;
pub mod info;
pub mod probe;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use reap_core::pipeline::config::HarvestConfig;
use tracing::debug;

/// Read a TOML run configuration.
pub fn load_config(path: &Path) -> Result<HarvestConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&contents)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    debug!(path = %path.display(), "Config loaded");
    Ok(config)
}
