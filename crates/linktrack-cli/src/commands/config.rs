use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use linktrack_core::pipeline::TrackerConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Serial port to put in the generated config
    #[arg(long)]
    pub port: Option<String>,

    /// Frame source to put in the generated config
    #[arg(long)]
    pub source: Option<String>,
}

/// Print or save a full default TrackerConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let mut config = TrackerConfig::default();
    config.serial.port = args.port.clone();
    config.capture.source = args.source.clone().unwrap_or_else(|| "frames/".into());

    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
