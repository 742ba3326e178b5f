use ndarray::{Array2, Array3};

use crate::color::{to_hsv, HsvBand};
use crate::frame::Frame;

use super::config::SegmentationConfig;
use super::morphology::morphological_opening;

/// Isolate the pixels of `frame` that fall inside `band`, then denoise.
pub fn segment_color(frame: &Frame, band: &HsvBand, config: &SegmentationConfig) -> Array2<bool> {
    let hsv = to_hsv(frame);
    segment_hsv(&hsv, band, config)
}

/// Threshold and denoise an already converted HSV image.
///
/// Lets the locator convert once and segment three bands from the same array.
pub fn segment_hsv(hsv: &Array3<u8>, band: &HsvBand, config: &SegmentationConfig) -> Array2<bool> {
    let mask = threshold_hsv(hsv, band);
    if mask.is_empty() {
        return mask;
    }
    morphological_opening(&mask, config.kernel_size, config.iterations)
}

/// Raw band mask without denoising. The hue wrap range, if any, is unioned in.
pub fn threshold_hsv(hsv: &Array3<u8>, band: &HsvBand) -> Array2<bool> {
    let (h, w, _) = hsv.dim();
    let bounds = band.bounds();
    Array2::from_shape_fn((h, w), |(row, col)| {
        bounds.contains(hsv[[row, col, 0]], hsv[[row, col, 1]], hsv[[row, col, 2]])
    })
}
