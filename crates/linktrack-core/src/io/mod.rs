pub mod crop;
pub mod image_io;
pub mod source;

pub use crop::{crop_to_aspect, CropRect};
pub use image_io::{load_frame, save_frame};
pub use source::{Capture, FrameSource, ImageSequenceSource};
