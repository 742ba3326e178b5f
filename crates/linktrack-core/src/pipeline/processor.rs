use tracing::{debug, warn};

use crate::detection::{MarkerDetection, MarkerLocator};
use crate::frame::{Frame, JointPositions};
use crate::io::crop_to_aspect;
use crate::transform::CoordinateTransformer;

use super::config::TrackerConfig;

/// Output of processing one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    /// The frame after aspect-ratio cropping.
    pub original: Frame,
    pub detection: MarkerDetection,
    /// Physical positions; `None` unless all three markers were found and the
    /// geometry was usable.
    pub positions: Option<JointPositions>,
}

impl FrameOutput {
    pub fn success(&self) -> bool {
        self.positions.is_some()
    }
}

/// Crop, locate and transform, with no I/O and no shared state.
#[derive(Clone, Debug)]
pub struct FrameProcessor {
    locator: MarkerLocator,
    transformer: CoordinateTransformer,
    aspect_ratio: f64,
}

impl FrameProcessor {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            locator: MarkerLocator::new(
                &config.calibration,
                &config.segmentation,
                &config.annotation,
            ),
            transformer: CoordinateTransformer::new(config.calibration.link_length_cm),
            aspect_ratio: config.capture.aspect_ratio,
        }
    }

    pub fn locator(&self) -> &MarkerLocator {
        &self.locator
    }

    pub fn process(&self, frame: Frame) -> FrameOutput {
        let original = crop_to_aspect(frame, self.aspect_ratio);
        let detection = self.locator.locate(&original);

        let positions = match detection.pixels.all() {
            Some((green, blue, red)) => match self.transformer.transform(green, blue, red) {
                Ok(positions) => Some(positions),
                Err(e) => {
                    warn!(error = %e, "skipping actuation this cycle");
                    None
                }
            },
            None => {
                debug!("not all markers visible");
                None
            }
        };

        FrameOutput {
            original,
            detection,
            positions,
        }
    }
}
