use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use crate::color::{to_hsv, HsvBand};
use crate::consts::RGB_WHITE;
use crate::frame::{Frame, FrameKind, Marker, PixelPosition};
use crate::pipeline::config::{AnnotationConfig, CalibrationConfig};

use super::centroid::find_center;
use super::config::{AreaBounds, SegmentationConfig};
use super::draw::{draw_line, fill_circle};
use super::segment::segment_hsv;

/// Pixel centers found in one frame. `None` means the marker was not seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkerPixels {
    pub green: Option<PixelPosition>,
    pub blue: Option<PixelPosition>,
    pub red: Option<PixelPosition>,
}

impl MarkerPixels {
    pub fn get(&self, marker: Marker) -> Option<PixelPosition> {
        match marker {
            Marker::Green => self.green,
            Marker::Blue => self.blue,
            Marker::Red => self.red,
        }
    }

    /// All three positions, only when every marker was found.
    pub fn all(&self) -> Option<(PixelPosition, PixelPosition, PixelPosition)> {
        Some((self.green?, self.blue?, self.red?))
    }

    pub fn is_complete(&self) -> bool {
        self.all().is_some()
    }
}

/// Result of running the locator on one frame.
#[derive(Clone, Debug)]
pub struct MarkerDetection {
    pub pixels: MarkerPixels,
    /// Black canvas with the found markers and links drawn on it.
    pub annotated: Frame,
}

impl MarkerDetection {
    pub fn success(&self) -> bool {
        self.pixels.is_complete()
    }
}

/// Finds the three calibrated markers in a frame.
#[derive(Clone, Debug)]
pub struct MarkerLocator {
    bands: [HsvBand; 3],
    area: AreaBounds,
    segmentation: SegmentationConfig,
    marker_radius: i32,
    line_thickness: u32,
}

impl MarkerLocator {
    pub fn new(
        calibration: &CalibrationConfig,
        segmentation: &SegmentationConfig,
        annotation: &AnnotationConfig,
    ) -> Self {
        let ratio = calibration.pixels_per_cm();
        Self {
            bands: [calibration.green, calibration.blue, calibration.red],
            area: AreaBounds::from_diameters(
                calibration.min_diameter_cm,
                calibration.max_diameter_cm,
                ratio,
            ),
            segmentation: segmentation.clone(),
            marker_radius: (calibration.max_diameter_cm * ratio / 2.0) as i32,
            line_thickness: annotation.line_thickness,
        }
    }

    pub fn area_bounds(&self) -> AreaBounds {
        self.area
    }

    pub fn band(&self, marker: Marker) -> &HsvBand {
        &self.bands[marker as usize]
    }

    /// Denoised masks in green, blue, red order.
    pub fn masks(&self, frame: &Frame) -> Vec<Array2<bool>> {
        let hsv = to_hsv(frame);
        self.bands
            .par_iter()
            .map(|band| segment_hsv(&hsv, band, &self.segmentation))
            .collect()
    }

    pub fn locate(&self, frame: &Frame) -> MarkerDetection {
        let centers: Vec<Option<PixelPosition>> = self
            .masks(frame)
            .iter()
            .map(|mask| find_center(mask, &self.area))
            .collect();

        let pixels = MarkerPixels {
            green: centers[0],
            blue: centers[1],
            red: centers[2],
        };
        debug!(
            green = ?pixels.green,
            blue = ?pixels.blue,
            red = ?pixels.red,
            "markers located"
        );

        let annotated = self.annotate(frame.width(), frame.height(), &pixels);
        MarkerDetection { pixels, annotated }
    }

    fn annotate(&self, width: usize, height: usize, pixels: &MarkerPixels) -> Frame {
        let mut canvas = Frame::blank(width, height, FrameKind::Annotated);

        for marker in Marker::ALL {
            if let Some(center) = pixels.get(marker) {
                fill_circle(&mut canvas, center, self.marker_radius, marker.display_color());
            }
        }
        if let (Some(green), Some(blue)) = (pixels.green, pixels.blue) {
            draw_line(&mut canvas, green, blue, self.line_thickness, RGB_WHITE);
        }
        if let (Some(blue), Some(red)) = (pixels.blue, pixels.red) {
            draw_line(&mut canvas, blue, red, self.line_thickness, RGB_WHITE);
        }

        canvas
    }
}
