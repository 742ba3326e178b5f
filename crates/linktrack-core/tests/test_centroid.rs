mod common;

use ndarray::Array2;

use linktrack_core::detection::components::connected_regions;
use linktrack_core::detection::{find_center, AreaBounds};
use linktrack_core::frame::PixelPosition;

use common::{add_disk, disk_mask};

fn marker_bounds() -> AreaBounds {
    // 7-15 cm diameters at 640 px over 215 cm.
    AreaBounds::from_diameters(7.0, 15.0, 640.0 / 215.0)
}

// ---------------------------------------------------------------------------
// AreaBounds
// ---------------------------------------------------------------------------

#[test]
fn test_area_bounds_from_diameters() {
    let bounds = marker_bounds();
    approx::assert_relative_eq!(bounds.min, 341.01, epsilon = 0.01);
    approx::assert_relative_eq!(bounds.max, 1565.87, epsilon = 0.01);
}

#[test]
fn test_area_bounds_are_exclusive() {
    let bounds = AreaBounds::new(10.0, 20.0);
    assert!(!bounds.contains(10.0));
    assert!(bounds.contains(10.5));
    assert!(!bounds.contains(20.0));
}

// ---------------------------------------------------------------------------
// Connected regions
// ---------------------------------------------------------------------------

#[test]
fn test_regions_use_eight_connectivity() {
    let mut mask = Array2::from_elem((5, 5), false);
    mask[[0, 0]] = true;
    mask[[1, 1]] = true;
    mask[[2, 2]] = true;
    mask[[4, 0]] = true;
    let regions = connected_regions(&mask);
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].area(), 3.0);
    assert_eq!(regions[0].centroid(), Some((1.0, 1.0)));
    assert_eq!(regions[1].area(), 1.0);
}

#[test]
fn test_regions_merge_u_shape() {
    // Two arms joined only at the bottom row need the union step.
    let mut mask = Array2::from_elem((4, 5), false);
    for r in 0..4 {
        mask[[r, 0]] = true;
        mask[[r, 4]] = true;
    }
    for c in 0..5 {
        mask[[3, c]] = true;
    }
    let regions = connected_regions(&mask);
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].area(), 11.0);
    let (cx, _) = regions[0].centroid().unwrap();
    approx::assert_abs_diff_eq!(cx, 2.0);
}

#[test]
fn test_regions_of_empty_mask() {
    assert!(connected_regions(&Array2::from_elem((0, 0), false)).is_empty());
    assert!(connected_regions(&Array2::from_elem((4, 4), false)).is_empty());
}

// ---------------------------------------------------------------------------
// find_center
// ---------------------------------------------------------------------------

#[test]
fn test_disk_inside_bounds_gives_its_center() {
    let mask = disk_mask(100, 100, 40, 55, 17);
    let center = find_center(&mask, &marker_bounds()).expect("disk should qualify");
    assert!((center.x - 40).abs() <= 1 && (center.y - 55).abs() <= 1, "{center:?}");
}

#[test]
fn test_region_below_min_area_is_rejected() {
    let mask = disk_mask(100, 100, 50, 50, 8);
    assert_eq!(find_center(&mask, &marker_bounds()), None);
}

#[test]
fn test_region_above_max_area_is_rejected() {
    let mask = disk_mask(100, 100, 50, 50, 25);
    assert_eq!(find_center(&mask, &marker_bounds()), None);
}

#[test]
fn test_empty_mask_has_no_center() {
    let mask = Array2::from_elem((50, 50), false);
    assert_eq!(find_center(&mask, &marker_bounds()), None);
}

#[test]
fn test_last_qualifying_region_wins() {
    let mut mask = disk_mask(200, 200, 40, 40, 17);
    add_disk(&mut mask, 150, 150, 17);
    // Too big; comes last in raster order but does not qualify.
    add_disk(&mut mask, 60, 170, 28);
    let center = find_center(&mask, &marker_bounds()).expect("two candidates qualify");
    assert_eq!(center, PixelPosition::new(150, 150));
}
