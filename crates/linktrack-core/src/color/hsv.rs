//! RGB to 8-bit HSV conversion.
//!
//! Follows the OpenCV 8-bit convention: hue is degrees / 2 in `[0, 180)`,
//! saturation and value are in `[0, 255]`.

use ndarray::{Array3, Axis, Zip};

use crate::consts::{CHANNEL_MAX, HUE_MAX, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::Frame;

/// Convert one RGB sample to `(hue, saturation, value)`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let saturation = if max > 0.0 {
        (CHANNEL_MAX as f32 * delta / max).round()
    } else {
        0.0
    };

    let hue_degrees = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let hue_degrees = if hue_degrees < 0.0 {
        hue_degrees + 360.0
    } else {
        hue_degrees
    };
    let hue = ((hue_degrees / 2.0).round() as i32).rem_euclid(HUE_MAX);

    (hue as u8, saturation as u8, max as u8)
}

/// Convert a color frame to an HSV array of the same shape.
///
/// Channel order of the result is `(hue, saturation, value)`.
pub fn to_hsv(frame: &Frame) -> Array3<u8> {
    let (h, w, _) = frame.data.dim();
    let mut hsv = Array3::<u8>::zeros((h, w, 3));

    let zip = Zip::from(hsv.lanes_mut(Axis(2))).and(frame.data.lanes(Axis(2)));
    let convert = |mut out: ndarray::ArrayViewMut1<u8>, rgb: ndarray::ArrayView1<u8>| {
        let (hue, sat, val) = rgb_to_hsv(rgb[0], rgb[1], rgb[2]);
        out[0] = hue;
        out[1] = sat;
        out[2] = val;
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(convert);
    } else {
        zip.for_each(convert);
    }

    hsv
}
