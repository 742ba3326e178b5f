use std::collections::HashMap;

use ndarray::Array2;

/// Raw image moments of a single connected region.
#[derive(Clone, Debug)]
pub struct Region {
    /// Root label; smaller labels start earlier in raster order.
    pub label: u32,
    /// Zeroth moment, i.e. the pixel count.
    pub m00: f64,
    /// First moment along x (column).
    pub m10: f64,
    /// First moment along y (row).
    pub m01: f64,
}

impl Region {
    pub fn area(&self) -> f64 {
        self.m00
    }

    /// Center of mass `(x, y)`, or `None` for a massless region.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// Label 8-connected regions of a binary mask using two-pass labeling with
/// union-find.
///
/// Returns regions in raster order of their first pixel.
pub fn connected_regions(mask: &Array2<bool>) -> Vec<Region> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    let mut labels = Array2::<u32>::zeros((h, w));
    let mut next_label: u32 = 1;
    // Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: provisional labels from the already-visited neighbors.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let mut neighbors = [0u32; 4];
            if col > 0 {
                neighbors[0] = labels[[row, col - 1]];
            }
            if row > 0 {
                neighbors[1] = labels[[row - 1, col]];
                if col > 0 {
                    neighbors[2] = labels[[row - 1, col - 1]];
                }
                if col + 1 < w {
                    neighbors[3] = labels[[row - 1, col + 1]];
                }
            }

            let smallest = neighbors.iter().copied().filter(|&l| l > 0).min();
            match smallest {
                None => {
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                Some(smallest) => {
                    labels[[row, col]] = smallest;
                    for &other in neighbors.iter().filter(|&&l| l > 0 && l != smallest) {
                        union(&mut parent, smallest, other);
                    }
                }
            }
        }
    }

    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }

    // Pass 2: resolve labels and accumulate moments.
    let mut regions = HashMap::<u32, Region>::new();

    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = parent[lbl as usize];

            let entry = regions.entry(root).or_insert(Region {
                label: root,
                m00: 0.0,
                m10: 0.0,
                m01: 0.0,
            });

            entry.m00 += 1.0;
            entry.m10 += col as f64;
            entry.m01 += row as f64;
        }
    }

    let mut regions: Vec<Region> = regions.into_values().collect();
    regions.sort_unstable_by_key(|r| r.label);
    regions
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // The smaller root survives so raster order is preserved.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
