pub mod config;
pub mod detect;
pub mod encode;
pub mod ports;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use linktrack_core::pipeline::TrackerConfig;

/// Load a TOML config file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<TrackerConfig> {
    let Some(path) = path else {
        return Ok(TrackerConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: TrackerConfig = toml::from_str(&contents).context("Invalid tracker config")?;
    Ok(config)
}
