use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::{LinkTrackError, Result};
use crate::frame::Frame;

/// Load any image format supported by the `image` crate as a color frame.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let img = image::open(path)?.to_rgb8();
    frame_from_rgb_image(img)
}

/// Convert an `image` RGB buffer into a frame without copying pixels.
pub fn frame_from_rgb_image(img: RgbImage) -> Result<Frame> {
    let (w, h) = img.dimensions();
    Frame::from_rgb(w as usize, h as usize, img.into_raw())
}

pub fn frame_to_rgb_image(frame: &Frame) -> Result<RgbImage> {
    let (w, h) = (frame.width(), frame.height());
    let pixels: Vec<u8> = frame.data.iter().copied().collect();
    RgbImage::from_raw(w as u32, h as u32, pixels)
        .ok_or(LinkTrackError::InvalidDimensions { width: w, height: h })
}

/// Save a frame as 8-bit RGB PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    frame_to_rgb_image(frame)?.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a frame, choosing the format from the file extension (PNG by default).
pub fn save_frame(frame: &Frame, path: &Path) -> Result<()> {
    match ImageFormat::from_path(path) {
        Ok(format) => {
            frame_to_rgb_image(frame)?.save_with_format(path, format)?;
            Ok(())
        }
        Err(_) => save_png(frame, path),
    }
}
