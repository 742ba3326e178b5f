use ndarray::s;

use crate::frame::Frame;

/// A rectangle in image coordinates for cropping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CropRect {
    /// Centered crop of a `width` x `height` image to `aspect_ratio`
    /// (width / height). The same margin is removed from both sides, so an odd
    /// leftover keeps one extra column or row.
    pub fn centered(width: usize, height: usize, aspect_ratio: f64) -> CropRect {
        let full = CropRect {
            x: 0,
            y: 0,
            width,
            height,
        };
        if width == 0 || height == 0 || !(aspect_ratio > 0.0) {
            return full;
        }

        let current = width as f64 / height as f64;
        if current > aspect_ratio {
            let desired = (height as f64 * aspect_ratio) as usize;
            let margin = (width - desired.min(width)) / 2;
            CropRect {
                x: margin,
                width: width - 2 * margin,
                ..full
            }
        } else if current < aspect_ratio {
            let desired = (width as f64 / aspect_ratio) as usize;
            let margin = (height - desired.min(height)) / 2;
            CropRect {
                y: margin,
                height: height - 2 * margin,
                ..full
            }
        } else {
            full
        }
    }
}

/// Crop a frame symmetrically to `aspect_ratio`, taking ownership.
///
/// Frames already at the target ratio are returned untouched.
pub fn crop_to_aspect(frame: Frame, aspect_ratio: f64) -> Frame {
    let rect = CropRect::centered(frame.width(), frame.height(), aspect_ratio);
    if rect.width == frame.width() && rect.height == frame.height() {
        return frame;
    }
    let data = frame
        .data
        .slice(s![rect.y..rect.y + rect.height, rect.x..rect.x + rect.width, ..])
        .to_owned();
    Frame::new(data, frame.kind)
}
