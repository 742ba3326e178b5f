mod common;

use linktrack_core::color::{rgb_to_hsv, to_hsv, ChannelRange, HsvBand};
use linktrack_core::frame::{Frame, FrameKind};

use common::hsv_to_rgb;

// ---------------------------------------------------------------------------
// rgb_to_hsv
// ---------------------------------------------------------------------------

#[test]
fn test_rgb_to_hsv_primaries() {
    assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
    assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
    assert_eq!(rgb_to_hsv(0, 0, 255), (120, 255, 255));
}

#[test]
fn test_rgb_to_hsv_gray_has_no_hue_or_saturation() {
    assert_eq!(rgb_to_hsv(0, 0, 0), (0, 0, 0));
    assert_eq!(rgb_to_hsv(128, 128, 128), (0, 0, 128));
}

#[test]
fn test_rgb_to_hsv_hue_stays_below_180() {
    // Magenta-red close to 360 degrees rounds to 180 and must wrap to 0.
    let (h, _, _) = rgb_to_hsv(255, 0, 1);
    assert!(h < 180, "hue {h} escaped the domain");
}

#[test]
fn test_calibrated_colors_convert_back_near_base() {
    for (h, s, v) in [(55u8, 157u8, 135u8), (113, 189, 115), (178, 243, 175)] {
        let [r, g, b] = hsv_to_rgb(h, s, v);
        let (h2, s2, v2) = rgb_to_hsv(r, g, b);
        assert!((h2 as i32 - h as i32).abs() <= 1, "hue {h} -> {h2}");
        assert!((s2 as i32 - s as i32).abs() <= 2, "sat {s} -> {s2}");
        assert!((v2 as i32 - v as i32).abs() <= 1, "val {v} -> {v2}");
    }
}

#[test]
fn test_to_hsv_matches_per_pixel_conversion() {
    let mut frame = Frame::blank(4, 3, FrameKind::Color);
    frame.put_pixel(0, 0, [255, 0, 0]);
    frame.put_pixel(3, 2, [30, 50, 115]);
    let hsv = to_hsv(&frame);
    assert_eq!(hsv.dim(), (3, 4, 3));
    assert_eq!([hsv[[0, 0, 0]], hsv[[0, 0, 1]], hsv[[0, 0, 2]]], [0, 255, 255]);
    let (h, s, v) = rgb_to_hsv(30, 50, 115);
    assert_eq!([hsv[[2, 3, 0]], hsv[[2, 3, 1]], hsv[[2, 3, 2]]], [h, s, v]);
    assert_eq!([hsv[[1, 1, 0]], hsv[[1, 1, 1]], hsv[[1, 1, 2]]], [0, 0, 0]);
}

// ---------------------------------------------------------------------------
// HsvBand bounds
// ---------------------------------------------------------------------------

#[test]
fn test_band_bounds_inside_domain_have_no_wrap() {
    let bounds = HsvBand::new(55, 157, 135).bounds();
    assert_eq!(bounds.hue, ChannelRange { min: 35, max: 75 });
    assert_eq!(bounds.hue_wrap, None);
    assert_eq!(bounds.saturation, ChannelRange { min: 37, max: 255 });
    assert_eq!(bounds.value, ChannelRange { min: 15, max: 255 });
}

#[test]
fn test_band_bounds_above_180_wrap_to_low_hues() {
    let bounds = HsvBand::new(178, 243, 175).bounds();
    assert_eq!(bounds.hue, ChannelRange { min: 158, max: 180 });
    assert_eq!(bounds.hue_wrap, Some(ChannelRange { min: 0, max: 18 }));

    assert!(bounds.contains(178, 243, 175));
    assert!(bounds.contains(10, 243, 175));
    assert!(!bounds.contains(88, 243, 175));
}

#[test]
fn test_band_bounds_below_zero_wrap_to_high_hues() {
    let bounds = HsvBand::new(5, 200, 200).bounds();
    assert_eq!(bounds.hue, ChannelRange { min: 0, max: 25 });
    assert_eq!(bounds.hue_wrap, Some(ChannelRange { min: 165, max: 180 }));
    assert!(bounds.contains(170, 200, 200));
    assert!(!bounds.contains(100, 200, 200));
}

#[test]
fn test_band_rejects_out_of_range_saturation_and_value() {
    let bounds = HsvBand::new(60, 200, 200).with_tolerances(10, 20, 20).bounds();
    assert!(bounds.contains(60, 200, 200));
    assert!(!bounds.contains(60, 100, 200));
    assert!(!bounds.contains(60, 200, 100));
}

#[test]
fn test_band_validate() {
    assert!(HsvBand::new(55, 157, 135).validate("green").is_ok());
    assert!(HsvBand::new(179, 255, 255).validate("green").is_ok());
    assert!(HsvBand::new(180, 0, 0).validate("green").is_err());
    assert!(HsvBand::new(181, 0, 0).validate("green").is_err());
    assert!(HsvBand::new(0, 256, 0).validate("green").is_err());
    assert!(HsvBand::new(0, 0, -1).validate("green").is_err());
    let negative = HsvBand::new(10, 10, 10).with_tolerances(-1, 0, 0);
    let err = negative.validate("red").unwrap_err().to_string();
    assert!(err.contains("red"), "{err}");
}
