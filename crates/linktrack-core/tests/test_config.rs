use linktrack_core::color::HsvBand;
use linktrack_core::consts::{DEFAULT_BAUD_RATE, DEFAULT_INTERVAL_MS};
use linktrack_core::error::LinkTrackError;
use linktrack_core::pipeline::config::{CalibrationConfig, TrackerConfig};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_config_is_valid() {
    TrackerConfig::default().validate().unwrap();
}

#[test]
fn test_default_calibration_values() {
    let c = CalibrationConfig::default();
    assert_eq!(c.green, HsvBand::new(55, 157, 135));
    assert_eq!(c.blue, HsvBand::new(113, 189, 115));
    assert_eq!(c.red, HsvBand::new(178, 243, 175));
    assert_eq!(c.green.hue_tolerance, 20);
    assert_eq!(c.green.saturation_tolerance, 120);
    approx::assert_relative_eq!(c.pixels_per_cm(), 640.0 / 215.0);
    approx::assert_relative_eq!(c.link_length_cm, 30.0);
}

#[test]
fn test_default_capture_and_serial() {
    let config = TrackerConfig::default();
    assert_eq!(config.capture.interval_ms, DEFAULT_INTERVAL_MS);
    approx::assert_relative_eq!(config.capture.aspect_ratio, 1.0);
    assert_eq!(config.serial.port, None);
    assert_eq!(config.serial.baud_rate, DEFAULT_BAUD_RATE);
    assert_eq!(config.segmentation.kernel_size, 5);
    assert_eq!(config.segmentation.iterations, 3);
    assert_eq!(config.annotation.line_thickness, 5);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn assert_invalid(config: &TrackerConfig) {
    match config.validate() {
        Err(LinkTrackError::InvalidConfig(_)) => {}
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_rejects_inverted_diameters() {
    let mut config = TrackerConfig::default();
    config.calibration.min_diameter_cm = 15.0;
    config.calibration.max_diameter_cm = 7.0;
    assert_invalid(&config);
}

#[test]
fn test_rejects_non_positive_geometry() {
    let mut config = TrackerConfig::default();
    config.calibration.link_length_cm = 0.0;
    assert_invalid(&config);

    let mut config = TrackerConfig::default();
    config.calibration.frame_width_cm = f64::NAN;
    assert_invalid(&config);

    // A NaN upper bound would pass the ordering check and reject every region.
    let mut config = TrackerConfig::default();
    config.calibration.max_diameter_cm = f64::NAN;
    assert_invalid(&config);

    let mut config = TrackerConfig::default();
    config.calibration.max_diameter_cm = f64::INFINITY;
    assert_invalid(&config);
}

#[test]
fn test_rejects_nan_max_diameter_from_toml() {
    let mut text = toml::to_string(&TrackerConfig::default()).unwrap();
    text = text.replace("max_diameter_cm = 15.0", "max_diameter_cm = nan");
    assert!(text.contains("max_diameter_cm = nan"), "{text}");
    let config: TrackerConfig = toml::from_str(&text).unwrap();
    assert_invalid(&config);
}

#[test]
fn test_rejects_band_outside_domain() {
    let mut config = TrackerConfig::default();
    config.calibration.red = HsvBand::new(200, 243, 175);
    assert_invalid(&config);
}

#[test]
fn test_rejects_even_kernel_and_zero_interval() {
    let mut config = TrackerConfig::default();
    config.segmentation.kernel_size = 4;
    assert_invalid(&config);

    let mut config = TrackerConfig::default();
    config.capture.interval_ms = 0;
    assert_invalid(&config);

    let mut config = TrackerConfig::default();
    config.serial.baud_rate = 0;
    assert_invalid(&config);
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_toml_roundtrip() {
    let mut config = TrackerConfig::default();
    config.serial.port = Some("/dev/ttyUSB0".into());
    config.capture.source = "frames/".into();
    let text = toml::to_string_pretty(&config).unwrap();
    let restored: TrackerConfig = toml::from_str(&text).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let text = r#"
        [capture]
        source = "/dev/video0"
        interval_ms = 100

        [calibration.red]
        hue = 170
        saturation = 200
        value = 150
    "#;
    let config: TrackerConfig = toml::from_str(text).unwrap();
    assert_eq!(config.capture.source, "/dev/video0");
    assert_eq!(config.capture.interval_ms, 100);
    approx::assert_relative_eq!(config.capture.aspect_ratio, 1.0);
    assert_eq!(config.calibration.red, HsvBand::new(170, 200, 150));
    assert_eq!(config.calibration.green, HsvBand::new(55, 157, 135));
    assert_eq!(config.serial, Default::default());
}

#[test]
fn test_json_roundtrip() {
    let config = TrackerConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let restored: TrackerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}
