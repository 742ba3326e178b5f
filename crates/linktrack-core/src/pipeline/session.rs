use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{LinkTrackError, Result};
use crate::frame::JointPositions;
use crate::io::{Capture, FrameSource};
use crate::serial::{
    ChannelState, ChannelStats, CommandPacket, LinkOpener, SerialChannel, TelemetryStream,
};

use super::config::TrackerConfig;
use super::processor::FrameProcessor;
use super::state::{PipelineSnapshot, PublishedState};
use super::strategy::ActuationStrategy;
use super::ticker::Ticker;

/// Counters describing what the pipeline thread has done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Ticks the pipeline loop woke up for.
    pub iterations: u64,
    pub open_failures: u64,
    pub pull_failures: u64,
    pub frames_processed: u64,
    pub commands_issued: u64,
}

#[derive(Default)]
struct Counters {
    iterations: AtomicU64,
    open_failures: AtomicU64,
    pull_failures: AtomicU64,
    frames_processed: AtomicU64,
    commands_issued: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// A running closed-loop tracking session.
///
/// Owns two threads: the pipeline loop (capture, detect, actuate, publish)
/// and the serial channel. Readers poll [`TrackingSession::snapshot`] and the
/// telemetry stream at their own pace.
pub struct TrackingSession {
    running: Arc<AtomicBool>,
    pipeline: Option<JoinHandle<()>>,
    serial: Arc<SerialChannel>,
    state: Arc<PublishedState>,
    counters: Arc<Counters>,
}

impl TrackingSession {
    /// Validate `config`, open the serial channel and start the pipeline loop.
    pub fn start(
        config: TrackerConfig,
        source: Box<dyn FrameSource>,
        strategy: Box<dyn ActuationStrategy>,
        opener: Box<dyn LinkOpener>,
    ) -> Result<Self> {
        config.validate()?;

        let serial = Arc::new(SerialChannel::start(&config.serial, opener)?);
        let running = Arc::new(AtomicBool::new(true));
        let state = Arc::new(PublishedState::new());
        let counters = Arc::new(Counters::default());

        let worker = PipelineWorker {
            processor: FrameProcessor::new(&config),
            identifier: config.capture.source.clone(),
            interval: Duration::from_millis(config.capture.interval_ms),
            source,
            strategy,
            running: Arc::clone(&running),
            serial: Arc::clone(&serial),
            state: Arc::clone(&state),
            counters: Arc::clone(&counters),
        };

        let pipeline = std::thread::Builder::new()
            .name("linktrack-pipeline".into())
            .spawn(move || worker.run())
            .map_err(|e| {
                serial.stop();
                LinkTrackError::Spawn(e.to_string())
            })?;

        info!(
            source = %config.capture.source,
            interval_ms = config.capture.interval_ms,
            "tracking session started"
        );

        Ok(Self {
            running,
            pipeline: Some(pipeline),
            serial,
            state,
            counters,
        })
    }

    /// Latest published pipeline output.
    pub fn snapshot(&self) -> Arc<PipelineSnapshot> {
        self.state.latest()
    }

    /// Shared handle for readers on other threads.
    pub fn published_state(&self) -> Arc<PublishedState> {
        Arc::clone(&self.state)
    }

    /// Characters received from the motor controller. Only the first call
    /// returns the stream.
    pub fn take_telemetry(&self) -> Option<TelemetryStream> {
        self.serial.take_telemetry()
    }

    pub fn serial_state(&self) -> ChannelState {
        self.serial.state()
    }

    pub fn serial_stats(&self) -> ChannelStats {
        self.serial.stats()
    }

    pub fn stats(&self) -> SessionStats {
        let c = &self.counters;
        SessionStats {
            iterations: c.iterations.load(Ordering::Relaxed),
            open_failures: c.open_failures.load(Ordering::Relaxed),
            pull_failures: c.pull_failures.load(Ordering::Relaxed),
            frames_processed: c.frames_processed.load(Ordering::Relaxed),
            commands_issued: c.commands_issued.load(Ordering::Relaxed),
        }
    }

    pub fn is_running(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Stop both threads. Waits for the current pipeline iteration to finish
    /// before the capture and the serial link are released. Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.pipeline.take() {
            if handle.join().is_err() {
                warn!("pipeline thread panicked");
            }
            self.serial.stop();
            info!("tracking session stopped");
        }
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// State owned by the pipeline thread.
struct PipelineWorker {
    processor: FrameProcessor,
    identifier: String,
    interval: Duration,
    source: Box<dyn FrameSource>,
    strategy: Box<dyn ActuationStrategy>,
    running: Arc<AtomicBool>,
    serial: Arc<SerialChannel>,
    state: Arc<PublishedState>,
    counters: Arc<Counters>,
}

impl PipelineWorker {
    fn run(mut self) {
        let mut ticker = Ticker::new(self.interval);
        let mut capture: Option<Box<dyn Capture>> = None;
        let mut last_positions = JointPositions::default();
        let mut cycle = 0u64;

        while ticker.wait(&self.running) {
            Counters::bump(&self.counters.iterations);

            let Some(active) = capture.as_mut() else {
                match self.source.open(&self.identifier) {
                    Ok(opened) => {
                        info!(source = %self.identifier, "frame source opened");
                        capture = Some(opened);
                    }
                    Err(e) => {
                        warn!(source = %self.identifier, error = %e, "failed to open frame source");
                        Counters::bump(&self.counters.open_failures);
                    }
                }
                continue;
            };

            let frame = match active.read() {
                Ok(frame) => frame,
                Err(e) => {
                    debug!(error = %e, "frame pull failed");
                    Counters::bump(&self.counters.pull_failures);
                    continue;
                }
            };

            let output = self.processor.process(frame);
            Counters::bump(&self.counters.frames_processed);
            cycle += 1;

            let mut command = None;
            if let Some(positions) = output.positions {
                last_positions = positions;
                let issued = self
                    .strategy
                    .actuate(positions.green, positions.blue, positions.red)
                    .saturated();
                if let Err(fault) = self.serial.send(CommandPacket::encode(issued)) {
                    debug!(%fault, "motor command not delivered");
                }
                Counters::bump(&self.counters.commands_issued);
                command = Some(issued);
            }

            self.state.publish(PipelineSnapshot {
                cycle,
                success: output.positions.is_some(),
                original: Some(Arc::new(output.original)),
                annotated: Some(Arc::new(output.detection.annotated)),
                pixels: output.detection.pixels,
                positions: last_positions,
                command,
            });
        }

        if capture.take().is_some() {
            debug!("frame source released");
        }
    }
}
