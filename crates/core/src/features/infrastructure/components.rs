//! Connected-component labelling of foreground masks.
//!
//! Two-pass union-find over 4-connected neighbours.

use ndarray::Array2;

/// Pixels of one connected foreground region, as `(row, col)` in raster order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pub pixels: Vec<(usize, usize)>,
}

impl Component {
    pub fn area(&self) -> usize {
        self.pixels.len()
    }
}

/// Find root of element `i` with path halving for amortized near-O(1).
pub fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Merge the sets containing `a` and `b`. The smaller root wins so roots
/// stay at the first raster index of their set.
pub fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra < rb {
        parent[rb] = ra;
    } else if rb < ra {
        parent[ra] = rb;
    }
}

/// Largest 4-connected component of `mask`.
///
/// Ties go to the component whose first pixel comes first in raster order.
pub fn largest_component(mask: &Array2<bool>) -> Option<Component> {
    let (h, w) = mask.dim();
    let mut parent: Vec<usize> = (0..h * w).collect();

    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }
            let idx = row * w + col;
            if col > 0 && mask[[row, col - 1]] {
                union(&mut parent, idx, idx - 1);
            }
            if row > 0 && mask[[row - 1, col]] {
                union(&mut parent, idx, idx - w);
            }
        }
    }

    let mut sizes = vec![0usize; h * w];
    for (idx, &fg) in mask.iter().enumerate() {
        if fg {
            let root = find(&mut parent, idx);
            sizes[root] += 1;
        }
    }

    // Roots are the minimum index of their set, so scanning in index order
    // with a strict comparison keeps the earliest component on ties.
    let mut best: Option<(usize, usize)> = None;
    for (root, &size) in sizes.iter().enumerate() {
        if size > 0 && best.map_or(true, |(_, best_size)| size > best_size) {
            best = Some((root, size));
        }
    }
    let (best_root, best_size) = best?;

    let mut pixels = Vec::with_capacity(best_size);
    for (idx, &fg) in mask.iter().enumerate() {
        if fg && find(&mut parent, idx) == best_root {
            pixels.push((idx / w, idx % w));
        }
    }
    Some(Component { pixels })
}
