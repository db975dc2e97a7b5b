//! Deterministic single-plane resampling.
//!
//! Large reductions go through an integer box average first so bilinear
//! sampling does not alias; the result is then bilinearly mapped onto the
//! exact target grid.

use ndarray::{Array2, ArrayView2};

/// Resizes `src` to `target_w` x `target_h` (shape `(target_h, target_w)`).
pub fn resize_plane(src: ArrayView2<'_, u8>, target_w: usize, target_h: usize) -> Array2<u8> {
    let (h, w) = src.dim();
    let fx = w / target_w.max(1);
    let fy = h / target_h.max(1);
    if fx >= 2 && fy >= 2 {
        let reduced = box_downscale(src, fx, fy);
        bilinear(reduced.view(), target_w, target_h)
    } else {
        bilinear(src, target_w, target_h)
    }
}

/// Averages `fx` x `fy` blocks. Partial blocks at the right/bottom edges
/// are dropped.
pub fn box_downscale(src: ArrayView2<'_, u8>, fx: usize, fy: usize) -> Array2<u8> {
    let (h, w) = src.dim();
    let new_w = (w / fx).max(1);
    let new_h = (h / fy).max(1);

    Array2::from_shape_fn((new_h, new_w), |(y, x)| {
        let mut sum = 0u32;
        let mut count = 0u32;
        for dy in 0..fy {
            for dx in 0..fx {
                let sy = y * fy + dy;
                let sx = x * fx + dx;
                if sy < h && sx < w {
                    sum += src[[sy, sx]] as u32;
                    count += 1;
                }
            }
        }
        ((sum + count / 2) / count.max(1)) as u8
    })
}

/// Corner-aligned bilinear resampling.
pub fn bilinear(src: ArrayView2<'_, u8>, target_w: usize, target_h: usize) -> Array2<u8> {
    let (height, width) = src.dim();

    Array2::from_shape_fn((target_h, target_w), |(y, x)| {
        let src_x = x as f32 * (width as f32 - 1.0) / (target_w as f32 - 1.0).max(1.0);
        let src_y = y as f32 * (height as f32 - 1.0) / (target_h as f32 - 1.0).max(1.0);

        let x0 = (src_x.floor() as usize).min(width - 1);
        let x1 = (x0 + 1).min(width - 1);
        let y0 = (src_y.floor() as usize).min(height - 1);
        let y1 = (y0 + 1).min(height - 1);

        let fx = src_x - x0 as f32;
        let fy = src_y - y0 as f32;

        let v00 = src[[y0, x0]] as f32;
        let v10 = src[[y0, x1]] as f32;
        let v01 = src[[y1, x0]] as f32;
        let v11 = src[[y1, x1]] as f32;

        let val = v00 * (1.0 - fx) * (1.0 - fy)
            + v10 * fx * (1.0 - fy)
            + v01 * (1.0 - fx) * fy
            + v11 * fx * fy;
        val.round().clamp(0.0, 255.0) as u8
    })
}
