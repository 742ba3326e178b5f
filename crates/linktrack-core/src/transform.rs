//! Pixel to centimeter conversion.
//!
//! The green marker is the origin. The green-blue link has a known physical
//! length, so its measured pixel length gives the scale of the current frame.
//! Image y grows downward; physical y grows upward.

use crate::error::{LinkTrackError, Result};
use crate::frame::{JointPositions, PhysicalPosition, PixelPosition};

/// Maps marker pixel positions into physical coordinates.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateTransformer {
    link_length_cm: f64,
}

impl CoordinateTransformer {
    pub fn new(link_length_cm: f64) -> Self {
        Self { link_length_cm }
    }

    /// Pixels per centimeter for this frame.
    pub fn scale_factor(&self, green: PixelPosition, blue: PixelPosition) -> Result<f64> {
        let scale = green.distance_to(&blue) / self.link_length_cm;
        if scale == 0.0 || !scale.is_finite() {
            return Err(LinkTrackError::DegenerateGeometry {
                x: green.x,
                y: green.y,
            });
        }
        Ok(scale)
    }

    pub fn transform(
        &self,
        green: PixelPosition,
        blue: PixelPosition,
        red: PixelPosition,
    ) -> Result<JointPositions> {
        let scale = self.scale_factor(green, blue)?;
        Ok(JointPositions {
            green: PhysicalPosition::ORIGIN,
            blue: to_physical(green, blue, scale),
            red: to_physical(green, red, scale),
        })
    }
}

fn to_physical(origin: PixelPosition, p: PixelPosition, scale: f64) -> PhysicalPosition {
    PhysicalPosition {
        x: (p.x - origin.x) as f64 / scale,
        y: -((p.y - origin.y) as f64) / scale,
    }
}
