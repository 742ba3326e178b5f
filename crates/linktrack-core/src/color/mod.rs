pub mod band;
pub mod hsv;

pub use band::{ChannelRange, HsvBand, HsvBounds};
pub use hsv::{rgb_to_hsv, to_hsv};
