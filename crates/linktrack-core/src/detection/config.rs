use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MORPH_ITERATIONS, DEFAULT_MORPH_KERNEL_SIZE};
use crate::error::{LinkTrackError, Result};

/// Denoise parameters applied to every color mask.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Side of the square structuring element. Must be odd.
    #[serde(default = "default_kernel_size")]
    pub kernel_size: usize,
    /// Erosion passes, followed by the same number of dilation passes.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

fn default_kernel_size() -> usize {
    DEFAULT_MORPH_KERNEL_SIZE
}
fn default_iterations() -> usize {
    DEFAULT_MORPH_ITERATIONS
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_MORPH_KERNEL_SIZE,
            iterations: DEFAULT_MORPH_ITERATIONS,
        }
    }
}

impl SegmentationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(LinkTrackError::InvalidConfig(format!(
                "morphology kernel size must be odd and non-zero, got {}",
                self.kernel_size
            )));
        }
        if self.iterations == 0 {
            return Err(LinkTrackError::InvalidConfig(
                "morphology iterations must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Exclusive pixel-area window a region must fall in to count as a marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaBounds {
    pub min: f64,
    pub max: f64,
}

impl AreaBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Area window of a disk whose diameter lies in `[min_cm, max_cm]`,
    /// seen at `pixels_per_cm`.
    pub fn from_diameters(min_cm: f64, max_cm: f64, pixels_per_cm: f64) -> Self {
        Self {
            min: disk_area(min_cm * pixels_per_cm),
            max: disk_area(max_cm * pixels_per_cm),
        }
    }

    pub fn contains(&self, area: f64) -> bool {
        area > self.min && area < self.max
    }
}

fn disk_area(diameter: f64) -> f64 {
    PI * (diameter / 2.0).powi(2)
}
