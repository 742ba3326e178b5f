use std::sync::Arc;

use parking_lot::RwLock;

use crate::detection::MarkerPixels;
use crate::frame::{Frame, JointPositions};
use crate::serial::MotorCommand;

/// Everything the pipeline produced in one cycle, published as a unit.
#[derive(Clone, Debug, Default)]
pub struct PipelineSnapshot {
    /// Number of frames processed so far; 0 before the first one.
    pub cycle: u64,
    /// All three markers were found and transformed this cycle. When false,
    /// `positions` are carried over from the last successful cycle and must
    /// not be trusted as current.
    pub success: bool,
    /// Cropped camera frame.
    pub original: Option<Arc<Frame>>,
    /// Visualization of the detected markers.
    pub annotated: Option<Arc<Frame>>,
    /// Raw pixel detections of this cycle, including partial ones.
    pub pixels: MarkerPixels,
    pub positions: JointPositions,
    /// Command issued this cycle, if any.
    pub command: Option<MotorCommand>,
}

/// Latest pipeline output, shared between the pipeline thread and readers.
///
/// Publishing swaps in a whole new snapshot, so a reader always sees frames,
/// flags and positions from the same cycle.
#[derive(Debug, Default)]
pub struct PublishedState {
    current: RwLock<Arc<PipelineSnapshot>>,
}

impl PublishedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, snapshot: PipelineSnapshot) {
        let snapshot = Arc::new(snapshot);
        *self.current.write() = snapshot;
    }

    pub fn latest(&self) -> Arc<PipelineSnapshot> {
        Arc::clone(&self.current.read())
    }
}
