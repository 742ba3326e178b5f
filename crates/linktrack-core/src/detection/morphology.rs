use ndarray::{Array2, Axis};

/// Morphological opening: `iterations` erosions followed by `iterations`
/// dilations with a `kernel_size` x `kernel_size` square kernel.
///
/// Removes speckle smaller than the kernel while keeping the principal shape
/// of larger blobs.
pub fn morphological_opening(
    mask: &Array2<bool>,
    kernel_size: usize,
    iterations: usize,
) -> Array2<bool> {
    let radius = kernel_size / 2;
    let mut result = mask.clone();
    for _ in 0..iterations {
        result = erode(&result, radius);
    }
    for _ in 0..iterations {
        result = dilate(&result, radius);
    }
    result
}

/// Binary erosion: a pixel stays true only if every in-bounds pixel of its
/// square neighborhood is true. Pixels outside the image are ignored.
pub fn erode(mask: &Array2<bool>, radius: usize) -> Array2<bool> {
    let rows = sweep(mask, radius, Axis(1), true);
    sweep(&rows, radius, Axis(0), true)
}

/// Binary dilation: a pixel becomes true if any pixel of its square
/// neighborhood is true.
pub fn dilate(mask: &Array2<bool>, radius: usize) -> Array2<bool> {
    let rows = sweep(mask, radius, Axis(1), false);
    sweep(&rows, radius, Axis(0), false)
}

/// One-dimensional min (`all == true`) or max filter along `axis`.
///
/// A square kernel is separable, so running this along columns then rows
/// equals the full 2-D pass at a fraction of the cost.
fn sweep(mask: &Array2<bool>, radius: usize, axis: Axis, all: bool) -> Array2<bool> {
    let mut result = Array2::from_elem(mask.dim(), false);
    if radius == 0 {
        result.assign(mask);
        return result;
    }

    for (src, mut dst) in mask.lanes(axis).into_iter().zip(result.lanes_mut(axis)) {
        let n = src.len();
        // Prefix count of true pixels, so each window is O(1).
        let mut prefix = vec![0usize; n + 1];
        for i in 0..n {
            prefix[i + 1] = prefix[i] + usize::from(src[i]);
        }
        for i in 0..n {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius).min(n - 1);
            let count = prefix[hi + 1] - prefix[lo];
            dst[i] = if all { count == hi - lo + 1 } else { count > 0 };
        }
    }

    result
}
