use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

use crate::consts::{RGB_BLUE, RGB_GREEN, RGB_RED};
use crate::error::{LinkTrackError, Result};

/// What the samples of a [`Frame`] represent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// Camera image.
    Color,
    /// Binary mask rendered as black/white.
    Mask,
    /// Visualization canvas produced by the marker locator.
    Annotated,
}

/// An 8-bit RGB image.
///
/// Pixel data is row-major with shape `(height, width, 3)`.
#[derive(Clone, Debug)]
pub struct Frame {
    pub data: Array3<u8>,
    pub kind: FrameKind,
}

impl Frame {
    pub fn new(data: Array3<u8>, kind: FrameKind) -> Self {
        Self { data, kind }
    }

    /// Build a color frame from packed RGB bytes.
    pub fn from_rgb(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let data = Array3::from_shape_vec((height, width, 3), pixels)
            .map_err(|_| LinkTrackError::InvalidDimensions { width, height })?;
        Ok(Self::new(data, FrameKind::Color))
    }

    /// A black frame of the given size.
    pub fn blank(width: usize, height: usize, kind: FrameKind) -> Self {
        Self::new(Array3::zeros((height, width, 3)), kind)
    }

    /// Render a binary mask as a white-on-black frame.
    pub fn from_mask(mask: &Array2<bool>) -> Self {
        let (h, w) = mask.dim();
        let data = Array3::from_shape_fn((h, w, 3), |(row, col, _)| {
            if mask[[row, col]] {
                255
            } else {
                0
            }
        });
        Self::new(data, FrameKind::Mask)
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        [
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
        ]
    }

    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        for (c, v) in rgb.into_iter().enumerate() {
            self.data[[y, x, c]] = v;
        }
    }
}

/// Integer pixel coordinates, x to the right and y downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPosition {
    pub x: i32,
    pub y: i32,
}

impl PixelPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels.
    pub fn distance_to(&self, other: &PixelPosition) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        dx.hypot(dy)
    }
}

/// Position in centimeters relative to the green marker, y pointing up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalPosition {
    pub x: f64,
    pub y: f64,
}

impl PhysicalPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ORIGIN: PhysicalPosition = PhysicalPosition { x: 0.0, y: 0.0 };
}

/// The three tracked markers, in link order from the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Green,
    Blue,
    Red,
}

impl Marker {
    pub const ALL: [Marker; 3] = [Marker::Green, Marker::Blue, Marker::Red];

    /// Fill color used on the annotated frame.
    pub fn display_color(&self) -> [u8; 3] {
        match self {
            Self::Green => RGB_GREEN,
            Self::Blue => RGB_BLUE,
            Self::Red => RGB_RED,
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Green => write!(f, "Green"),
            Self::Blue => write!(f, "Blue"),
            Self::Red => write!(f, "Red"),
        }
    }
}

/// Physical positions of all three markers for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JointPositions {
    pub green: PhysicalPosition,
    pub blue: PhysicalPosition,
    pub red: PhysicalPosition,
}
