//! Minimal raster primitives for the annotated frame.

use crate::frame::{Frame, PixelPosition};

/// Fill a disk of `radius` pixels around `center`, clipped to the frame.
pub fn fill_circle(frame: &mut Frame, center: PixelPosition, radius: i32, color: [u8; 3]) {
    let r2 = (radius as i64) * (radius as i64);
    for_each_in_box(
        frame,
        (center.x - radius, center.y - radius),
        (center.x + radius, center.y + radius),
        |x, y| {
            let dx = (x - center.x) as i64;
            let dy = (y - center.y) as i64;
            dx * dx + dy * dy <= r2
        },
        color,
    );
}

/// Draw a segment with round caps, `thickness` pixels wide.
pub fn draw_line(
    frame: &mut Frame,
    from: PixelPosition,
    to: PixelPosition,
    thickness: u32,
    color: [u8; 3],
) {
    let half = (thickness.max(1) as f64) / 2.0;
    let pad = half.ceil() as i32;
    let (ax, ay) = (from.x as f64, from.y as f64);
    let (dx, dy) = ((to.x - from.x) as f64, (to.y - from.y) as f64);
    let len2 = dx * dx + dy * dy;

    for_each_in_box(
        frame,
        (from.x.min(to.x) - pad, from.y.min(to.y) - pad),
        (from.x.max(to.x) + pad, from.y.max(to.y) + pad),
        |x, y| {
            let (px, py) = (x as f64 - ax, y as f64 - ay);
            let t = if len2 > 0.0 {
                ((px * dx + py * dy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (ex, ey) = (px - t * dx, py - t * dy);
            ex * ex + ey * ey <= half * half
        },
        color,
    );
}

fn for_each_in_box(
    frame: &mut Frame,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    inside: impl Fn(i32, i32) -> bool,
    color: [u8; 3],
) {
    let w = frame.width() as i32;
    let h = frame.height() as i32;
    for y in y0.max(0)..=y1.min(h - 1) {
        for x in x0.max(0)..=x1.min(w - 1) {
            if inside(x, y) {
                frame.put_pixel(x as usize, y as usize, color);
            }
        }
    }
}
