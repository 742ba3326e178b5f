pub mod centroid;
pub mod components;
pub mod config;
pub mod draw;
pub mod locator;
pub mod morphology;
pub mod segment;

pub use centroid::find_center;
pub use config::{AreaBounds, SegmentationConfig};
pub use locator::{MarkerDetection, MarkerLocator, MarkerPixels};
pub use segment::segment_color;
