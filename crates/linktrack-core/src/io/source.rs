use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LinkTrackError, Result};
use crate::frame::Frame;

use super::image_io::load_frame;

/// An open video stream. Dropping it releases the underlying device or file.
///
/// `read` must return within a bounded time so the pipeline can observe stop
/// requests; an error is treated as a transient pull failure.
pub trait Capture: Send {
    fn read(&mut self) -> Result<Frame>;
}

/// Opens captures from an opaque identifier (device index, path, stream URL).
pub trait FrameSource: Send + 'static {
    fn open(&mut self, identifier: &str) -> Result<Box<dyn Capture>>;
}

/// Plays back still images from a directory (sorted by file name) or a single
/// image file.
#[derive(Clone, Debug, Default)]
pub struct ImageSequenceSource {
    /// Restart from the first image after the last one.
    pub looping: bool,
}

impl ImageSequenceSource {
    pub fn new(looping: bool) -> Self {
        Self { looping }
    }
}

impl FrameSource for ImageSequenceSource {
    fn open(&mut self, identifier: &str) -> Result<Box<dyn Capture>> {
        let path = Path::new(identifier);
        let files = if path.is_dir() {
            list_images(path)?
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            return Err(LinkTrackError::Source(format!(
                "no such image file or directory: {identifier}"
            )));
        };

        if files.is_empty() {
            return Err(LinkTrackError::Source(format!(
                "no images found in {identifier}"
            )));
        }
        debug!(count = files.len(), source = identifier, "image sequence opened");

        Ok(Box::new(ImageSequence {
            files,
            next: 0,
            looping: self.looping,
        }))
    }
}

struct ImageSequence {
    files: Vec<PathBuf>,
    next: usize,
    looping: bool,
}

impl Capture for ImageSequence {
    fn read(&mut self) -> Result<Frame> {
        if self.next >= self.files.len() {
            if !self.looping {
                return Err(LinkTrackError::SourceExhausted);
            }
            self.next = 0;
        }
        let path = &self.files[self.next];
        self.next += 1;
        load_frame(path)
    }
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && image::ImageFormat::from_path(&path).is_ok() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
