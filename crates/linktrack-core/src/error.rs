use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkTrackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Frame source error: {0}")]
    Source(String),

    #[error("Frame source exhausted")]
    SourceExhausted,

    #[error("Green and blue markers coincide at ({x}, {y}); scale factor undefined")]
    DegenerateGeometry { x: i32, y: i32 },

    #[error("Serial link error: {0}")]
    Serial(String),

    #[error("Failed to spawn thread: {0}")]
    Spawn(String),
}

pub type Result<T> = std::result::Result<T, LinkTrackError>;

/// A hardware link fault that callers are expected to log and ignore.
///
/// Motor commands are superseded every cycle, so a dropped packet is never
/// retried. Kept separate from [`LinkTrackError`] so a caller can tell an
/// ignorable fault from a logic error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IoFault {
    #[error("serial link is not connected")]
    NotConnected,

    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
}
