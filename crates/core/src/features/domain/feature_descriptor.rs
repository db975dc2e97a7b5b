use std::f64::consts::FRAC_PI_4;

use crate::shared::region::Region;

/// Geometric summary of the dominant foreground region in one analysis frame.
///
/// Coordinates are analysis-frame pixels. When `subject_found` is false the
/// geometry fields are zeroed and must not be interpreted.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureDescriptor {
    pub subject_found: bool,
    pub centroid: (f64, f64),
    /// Centroid offset from the frame center, each axis in [-1, 1].
    pub offset: (f64, f64),
    pub bounding_box: Region,
    /// Lean of the principal axis from vertical in radians; positive when
    /// the top of the region points toward +x.
    pub orientation: f64,
    /// 0 for an isotropic blob, approaching 1 for a thin bar.
    pub elongation: f64,
    pub area_ratio: f64,
    pub confidence: f64,
    /// `(width, height)` of the analysis frame.
    pub frame_size: (usize, usize),
}

impl FeatureDescriptor {
    pub fn no_subject(frame_size: (usize, usize)) -> Self {
        Self {
            subject_found: false,
            centroid: (0.0, 0.0),
            offset: (0.0, 0.0),
            bounding_box: Region::default(),
            orientation: 0.0,
            elongation: 0.0,
            area_ratio: 0.0,
            confidence: 0.0,
            frame_size,
        }
    }

    pub fn has_subject(&self) -> bool {
        self.subject_found
    }

    /// Signed tilt signal in [-1, 1]: lean saturating at 45 degrees,
    /// attenuated for shapes without a clear principal axis.
    pub fn tilt(&self) -> f64 {
        (self.orientation / FRAC_PI_4).clamp(-1.0, 1.0) * self.elongation
    }
}
