pub mod config;
mod processor;
mod session;
mod state;
mod strategy;
pub mod ticker;

pub use config::TrackerConfig;
pub use processor::{FrameOutput, FrameProcessor};
pub use session::{SessionStats, TrackingSession};
pub use state::{PipelineSnapshot, PublishedState};
pub use strategy::{ActuationStrategy, HoldStill, LogPositions};
