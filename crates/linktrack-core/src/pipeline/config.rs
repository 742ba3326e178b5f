use serde::{Deserialize, Serialize};

use crate::color::HsvBand;
use crate::consts::{
    CALIBRATED_HSV_BLUE, CALIBRATED_HSV_GREEN, CALIBRATED_HSV_RED, DEFAULT_ASPECT_RATIO,
    DEFAULT_BAUD_RATE, DEFAULT_FRAME_WIDTH_CM, DEFAULT_GREEN_BLUE_LINK_CM, DEFAULT_IMAGE_WIDTH_PX,
    DEFAULT_INTERVAL_MS, DEFAULT_LINE_THICKNESS, DEFAULT_MAX_DIAMETER_CM,
    DEFAULT_MIN_DIAMETER_CM, DEFAULT_SERIAL_READ_TIMEOUT_MS, DEFAULT_SERIAL_RETRY_MS,
};
use crate::detection::SegmentationConfig;
use crate::error::{LinkTrackError, Result};

/// Everything a tracking session needs. Loaded once, never mutated at runtime.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub annotation: AnnotationConfig,
}

impl TrackerConfig {
    /// Reject configurations that could never produce a valid detection.
    pub fn validate(&self) -> Result<()> {
        self.calibration.validate()?;
        self.segmentation.validate()?;
        self.capture.validate()?;
        self.serial.validate()?;
        Ok(())
    }
}

/// Marker colors and the physical geometry of the rig.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    #[serde(default = "default_green")]
    pub green: HsvBand,
    #[serde(default = "default_blue")]
    pub blue: HsvBand,
    #[serde(default = "default_red")]
    pub red: HsvBand,
    /// Processed image width in pixels.
    #[serde(default = "default_image_width_px")]
    pub image_width_px: f64,
    /// Real-world width seen by the camera, in centimeters.
    #[serde(default = "default_frame_width_cm")]
    pub frame_width_cm: f64,
    #[serde(default = "default_min_diameter_cm")]
    pub min_diameter_cm: f64,
    #[serde(default = "default_max_diameter_cm")]
    pub max_diameter_cm: f64,
    /// Center-to-center distance between the green and blue markers.
    #[serde(default = "default_link_length_cm")]
    pub link_length_cm: f64,
}

fn band(hsv: (i32, i32, i32)) -> HsvBand {
    HsvBand::new(hsv.0, hsv.1, hsv.2)
}
fn default_green() -> HsvBand {
    band(CALIBRATED_HSV_GREEN)
}
fn default_blue() -> HsvBand {
    band(CALIBRATED_HSV_BLUE)
}
fn default_red() -> HsvBand {
    band(CALIBRATED_HSV_RED)
}
fn default_image_width_px() -> f64 {
    DEFAULT_IMAGE_WIDTH_PX
}
fn default_frame_width_cm() -> f64 {
    DEFAULT_FRAME_WIDTH_CM
}
fn default_min_diameter_cm() -> f64 {
    DEFAULT_MIN_DIAMETER_CM
}
fn default_max_diameter_cm() -> f64 {
    DEFAULT_MAX_DIAMETER_CM
}
fn default_link_length_cm() -> f64 {
    DEFAULT_GREEN_BLUE_LINK_CM
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            green: default_green(),
            blue: default_blue(),
            red: default_red(),
            image_width_px: DEFAULT_IMAGE_WIDTH_PX,
            frame_width_cm: DEFAULT_FRAME_WIDTH_CM,
            min_diameter_cm: DEFAULT_MIN_DIAMETER_CM,
            max_diameter_cm: DEFAULT_MAX_DIAMETER_CM,
            link_length_cm: DEFAULT_GREEN_BLUE_LINK_CM,
        }
    }
}

impl CalibrationConfig {
    /// Nominal pixels per centimeter, used to size the marker area window.
    pub fn pixels_per_cm(&self) -> f64 {
        self.image_width_px / self.frame_width_cm
    }

    pub fn validate(&self) -> Result<()> {
        self.green.validate("green")?;
        self.blue.validate("blue")?;
        self.red.validate("red")?;

        positive("image_width_px", self.image_width_px)?;
        positive("frame_width_cm", self.frame_width_cm)?;
        positive("min_diameter_cm", self.min_diameter_cm)?;
        positive("max_diameter_cm", self.max_diameter_cm)?;
        positive("link_length_cm", self.link_length_cm)?;
        if self.min_diameter_cm >= self.max_diameter_cm {
            return Err(LinkTrackError::InvalidConfig(format!(
                "min_diameter_cm ({}) must be below max_diameter_cm ({})",
                self.min_diameter_cm, self.max_diameter_cm
            )));
        }
        Ok(())
    }
}

/// Video source and loop pacing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Opaque identifier handed to the frame source (device, path, URL).
    #[serde(default)]
    pub source: String,
    /// Frames are center-cropped to this width/height ratio.
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,
    /// Minimum time between pipeline cycles.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_aspect_ratio() -> f64 {
    DEFAULT_ASPECT_RATIO
}
fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            source: String::new(),
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<()> {
        positive("aspect_ratio", self.aspect_ratio)?;
        if self.interval_ms == 0 {
            return Err(LinkTrackError::InvalidConfig(
                "interval_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Motor controller link. Framing is fixed at 8N1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Port name; `None` keeps the channel closed.
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// Wait between failed open attempts.
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
}

fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}
fn default_read_timeout_ms() -> u64 {
    DEFAULT_SERIAL_READ_TIMEOUT_MS
}
fn default_retry_interval_ms() -> u64 {
    DEFAULT_SERIAL_RETRY_MS
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: DEFAULT_SERIAL_READ_TIMEOUT_MS,
            retry_interval_ms: DEFAULT_SERIAL_RETRY_MS,
        }
    }
}

impl SerialConfig {
    pub fn validate(&self) -> Result<()> {
        if self.baud_rate == 0 {
            return Err(LinkTrackError::InvalidConfig("baud_rate must be > 0".into()));
        }
        if self.read_timeout_ms == 0 {
            return Err(LinkTrackError::InvalidConfig(
                "read_timeout_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// Thickness of the link segments in pixels.
    #[serde(default = "default_line_thickness")]
    pub line_thickness: u32,
}

fn default_line_thickness() -> u32 {
    DEFAULT_LINE_THICKNESS
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            line_thickness: DEFAULT_LINE_THICKNESS,
        }
    }
}

fn positive(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(LinkTrackError::InvalidConfig(format!(
            "{name} must be a positive number, got {v}"
        )))
    }
}
