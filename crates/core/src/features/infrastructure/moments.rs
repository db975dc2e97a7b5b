//! Second-order image moments of a binary region.

/// Centroid and normalized central moments of a pixel set.
///
/// `x` is the column and `y` the row, so `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeMoments {
    pub count: usize,
    pub cx: f64,
    pub cy: f64,
    pub mu20: f64,
    pub mu02: f64,
    pub mu11: f64,
}

/// Below this elongation the principal axis is treated as undefined.
const MIN_AXIS_ELONGATION: f64 = 1e-6;

impl ShapeMoments {
    /// Moments of `(row, col)` pixels; `None` for an empty set.
    pub fn from_pixels(pixels: &[(usize, usize)]) -> Option<Self> {
        if pixels.is_empty() {
            return None;
        }
        let n = pixels.len() as f64;
        let sx: f64 = pixels.iter().map(|&(_, c)| c as f64).sum();
        let sy: f64 = pixels.iter().map(|&(r, _)| r as f64).sum();
        let (cx, cy) = (sx / n, sy / n);

        let (mut mu20, mut mu02, mut mu11) = (0.0, 0.0, 0.0);
        for &(r, c) in pixels {
            let dx = c as f64 - cx;
            let dy = r as f64 - cy;
            mu20 += dx * dx;
            mu02 += dy * dy;
            mu11 += dx * dy;
        }

        Some(Self {
            count: pixels.len(),
            cx,
            cy,
            mu20: mu20 / n,
            mu02: mu02 / n,
            mu11: mu11 / n,
        })
    }

    /// Eigenvalues of the covariance matrix, larger first.
    pub fn principal_variances(&self) -> (f64, f64) {
        let mean = (self.mu20 + self.mu02) / 2.0;
        let spread = (((self.mu20 - self.mu02) / 2.0).powi(2) + self.mu11.powi(2)).sqrt();
        (mean + spread, (mean - spread).max(0.0))
    }

    /// `1 - minor / major` variance ratio, in [0, 1].
    pub fn elongation(&self) -> f64 {
        let (major, minor) = self.principal_variances();
        if major <= f64::EPSILON {
            return 0.0;
        }
        (1.0 - minor / major).clamp(0.0, 1.0)
    }

    /// Angle of the major axis from +x in image coordinates, radians.
    pub fn axis_angle(&self) -> f64 {
        0.5 * (2.0 * self.mu11).atan2(self.mu20 - self.mu02)
    }

    /// Lean of the major axis from vertical, positive when its upper end
    /// points toward +x. Zero when the region has no dominant axis.
    pub fn lean(&self) -> f64 {
        if self.elongation() < MIN_AXIS_ELONGATION {
            return 0.0;
        }
        let theta = self.axis_angle();
        let (mut dx, mut dy) = (theta.cos(), theta.sin());
        if dy > 0.0 {
            dx = -dx;
            dy = -dy;
        }
        dx.atan2(-dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn rect(rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) -> Vec<(usize, usize)> {
        rows.flat_map(|r| cols.clone().map(move |c| (r, c)))
            .collect()
    }

    /// Staircase diagonal, `thickness` pixels wide, rising toward +x when `rising`.
    fn diagonal(len: usize, thickness: usize, rising: bool) -> Vec<(usize, usize)> {
        let mut pixels = Vec::new();
        for i in 0..len {
            let row = if rising { len - 1 - i } else { i };
            for t in 0..thickness {
                pixels.push((row, i + t));
            }
        }
        pixels
    }

    #[test]
    fn test_empty_has_no_moments() {
        assert!(ShapeMoments::from_pixels(&[]).is_none());
    }

    #[test]
    fn test_centroid_of_rect() {
        let m = ShapeMoments::from_pixels(&rect(2..6, 10..14)).unwrap();
        assert_eq!(m.count, 16);
        assert_relative_eq!(m.cx, 11.5);
        assert_relative_eq!(m.cy, 3.5);
    }

    #[test]
    fn test_square_has_no_axis() {
        let m = ShapeMoments::from_pixels(&rect(0..8, 0..8)).unwrap();
        assert_relative_eq!(m.elongation(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(m.lean(), 0.0);
    }

    #[test]
    fn test_upright_bar_has_zero_lean() {
        let m = ShapeMoments::from_pixels(&rect(0..40, 0..4)).unwrap();
        assert_relative_eq!(m.lean(), 0.0, epsilon = 1e-12);
        assert!(m.elongation() > 0.9);
    }

    #[test]
    fn test_horizontal_bar_is_perpendicular() {
        let m = ShapeMoments::from_pixels(&rect(0..4, 0..40)).unwrap();
        assert_relative_eq!(m.lean().abs(), FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn test_rising_diagonal_leans_right() {
        let m = ShapeMoments::from_pixels(&diagonal(30, 3, true)).unwrap();
        assert_relative_eq!(m.lean(), FRAC_PI_4, epsilon = 0.05);
    }

    #[test]
    fn test_falling_diagonal_leans_left() {
        let m = ShapeMoments::from_pixels(&diagonal(30, 3, false)).unwrap();
        assert_relative_eq!(m.lean(), -FRAC_PI_4, epsilon = 0.05);
    }

    #[test]
    fn test_principal_variances_ordered() {
        let m = ShapeMoments::from_pixels(&diagonal(20, 2, true)).unwrap();
        let (major, minor) = m.principal_variances();
        assert!(major >= minor);
        assert!(minor >= 0.0);
    }
}
