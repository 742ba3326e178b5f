use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use linktrack_core::frame::{Frame, Marker};
use linktrack_core::io::{load_frame, save_frame};
use linktrack_core::pipeline::FrameProcessor;

use crate::summary::print_detection;

#[derive(Args)]
pub struct DetectArgs {
    /// Input image
    pub file: PathBuf,

    /// Tracker config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Save the annotated frame to this path
    #[arg(short, long)]
    pub annotated: Option<PathBuf>,

    /// Save the green, blue and red masks into this directory
    #[arg(long)]
    pub masks: Option<PathBuf>,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    config.validate().context("Invalid tracker config")?;

    let frame = load_frame(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let processor = FrameProcessor::new(&config);
    let output = processor.process(frame);

    print_detection(&output);

    if let Some(ref path) = args.annotated {
        save_frame(&output.detection.annotated, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Annotated frame saved to {}", path.display());
    }

    if let Some(ref dir) = args.masks {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let masks = processor.locator().masks(&output.original);
        for (marker, mask) in Marker::ALL.iter().zip(masks.iter()) {
            let path = dir.join(format!("{}.png", marker.to_string().to_lowercase()));
            save_frame(&Frame::from_mask(mask), &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        println!("Masks saved to {}", dir.display());
    }

    Ok(())
}
