use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use linktrack_core::frame::PhysicalPosition;
use linktrack_core::io::{save_frame, ImageSequenceSource};
use linktrack_core::pipeline::{ActuationStrategy, HoldStill, LogPositions, TrackingSession};
use linktrack_core::serial::SerialPortOpener;
use tracing::info;

use crate::summary::{print_session_summary, print_snapshot, print_stats};

#[derive(Args)]
pub struct RunArgs {
    /// Image file or directory of frames (overrides the config source)
    pub source: Option<String>,

    /// Tracker config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Serial port of the motor controller (overrides the config)
    #[arg(short, long)]
    pub port: Option<String>,

    /// Baud rate of the serial link (overrides the config)
    #[arg(long)]
    pub baud: Option<u32>,

    /// Milliseconds between pipeline cycles (overrides the config)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Constant speed for motor A in [-1, 1]; both motors hold still if unset
    #[arg(long, allow_hyphen_values = true)]
    pub speed_a: Option<f64>,

    /// Constant speed for motor B in [-1, 1]
    #[arg(long, allow_hyphen_values = true)]
    pub speed_b: Option<f64>,

    /// Restart the image sequence after the last frame
    #[arg(long)]
    pub looping: bool,

    /// Stop after this many processed frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Stop after this many seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// Write the latest annotated frame here on exit
    #[arg(short, long)]
    pub annotated: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(ref source) = args.source {
        config.capture.source = source.clone();
    }
    if let Some(ref port) = args.port {
        config.serial.port = Some(port.clone());
    }
    if let Some(baud) = args.baud {
        config.serial.baud_rate = baud;
    }
    if let Some(interval) = args.interval_ms {
        config.capture.interval_ms = interval;
    }
    if config.capture.source.is_empty() {
        anyhow::bail!("No frame source given; pass one or set capture.source in the config");
    }

    print_session_summary(&config);

    let strategy: Box<dyn ActuationStrategy> = match (args.speed_a, args.speed_b) {
        (None, None) => Box::new(LogPositions::new(HoldStill)),
        (a, b) => {
            let (a, b) = (a.unwrap_or(0.0), b.unwrap_or(0.0));
            Box::new(LogPositions::new(
                move |_: PhysicalPosition, _: PhysicalPosition, _: PhysicalPosition| (a, b),
            ))
        }
    };

    let mut session = TrackingSession::start(
        config.clone(),
        Box::new(ImageSequenceSource::new(args.looping)),
        strategy,
        Box::new(SerialPortOpener),
    )
    .context("Failed to start tracking session")?;

    let mut telemetry = session.take_telemetry();
    let deadline = args.duration.map(|s| Instant::now() + Duration::from_secs_f64(s.max(0.0)));
    let poll = Duration::from_millis(config.capture.interval_ms);
    let mut last_cycle = 0;

    loop {
        std::thread::sleep(poll);

        if let Some(ref mut stream) = telemetry {
            let text = stream.drain();
            if !text.is_empty() {
                print!("{}", text);
            }
        }

        let snapshot = session.snapshot();
        if snapshot.cycle != last_cycle {
            last_cycle = snapshot.cycle;
            print_snapshot(&snapshot);
        }

        let stats = session.stats();
        if args.frames.is_some_and(|n| stats.frames_processed >= n) {
            info!(frames = stats.frames_processed, "frame budget reached");
            break;
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            info!("run duration elapsed");
            break;
        }
        // A finite sequence that has played out only yields pull failures.
        let exhausted = !args.looping && stats.frames_processed > 0 && stats.pull_failures > 0;
        if args.frames.is_none() && deadline.is_none() && exhausted {
            info!(frames = stats.frames_processed, "frame source exhausted");
            break;
        }
    }

    session.stop();
    println!();
    print_stats(&session.stats(), &session.serial_stats());

    if let Some(ref path) = args.annotated {
        if let Some(ref frame) = session.snapshot().annotated {
            save_frame(frame, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Annotated frame saved to {}", path.display());
        }
    }

    Ok(())
}
