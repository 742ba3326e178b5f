use ndarray::Array2;
use tracing::trace;

use crate::frame::PixelPosition;

use super::components::connected_regions;
use super::config::AreaBounds;

/// Find the marker center in a binary mask.
///
/// Every region whose area lies strictly inside `bounds` qualifies; regions
/// are visited in raster order and the last qualifying one wins. Two blobs of
/// the same color in view therefore yield the lower/rightmost one.
pub fn find_center(mask: &Array2<bool>, bounds: &AreaBounds) -> Option<PixelPosition> {
    let mut center = None;

    for region in connected_regions(mask) {
        let Some((cx, cy)) = region.centroid() else {
            continue;
        };
        let area = region.area();
        if bounds.contains(area) {
            center = Some(PixelPosition::new(cx as i32, cy as i32));
        } else {
            trace!(area, min = bounds.min, max = bounds.max, "region rejected by area");
        }
    }

    center
}
