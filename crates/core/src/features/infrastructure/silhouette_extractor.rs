use crate::features::domain::feature_descriptor::FeatureDescriptor;
use crate::features::domain::feature_extractor::FeatureExtractor;
use crate::features::domain::segmentation_policy::SegmentationPolicy;
use crate::preprocessing::domain::analysis_frame::AnalysisFrame;
use crate::shared::config::DetectorConfig;
use crate::shared::constants::{DEFAULT_MIN_AREA_RATIO, DEFAULT_TARGET_AREA_RATIO};
use crate::shared::region::Region;

use super::components::{largest_component, Component};
use super::moments::ShapeMoments;
use super::segmentation::{segment, SegmentationParams};

/// Describes the largest foreground blob by its silhouette moments.
///
/// Confidence combines size (area relative to `target_area_ratio`,
/// saturating at 1) with compactness (area over bounding-box area):
/// `size * (0.5 + 0.5 * fill)`.
pub struct SilhouetteExtractor {
    policy: SegmentationPolicy,
    params: SegmentationParams,
    min_area_ratio: f64,
    target_area_ratio: f64,
}

impl SilhouetteExtractor {
    pub fn new(
        policy: SegmentationPolicy,
        params: SegmentationParams,
        min_area_ratio: f64,
        target_area_ratio: f64,
    ) -> Self {
        Self {
            policy,
            params,
            min_area_ratio,
            target_area_ratio,
        }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(
            config.segmentation,
            SegmentationParams {
                contrast_threshold: config.contrast_threshold,
                background_threshold: config.background_threshold,
            },
            config.min_area_ratio,
            config.target_area_ratio,
        )
    }

    fn min_area(&self, frame_area: usize) -> usize {
        ((self.min_area_ratio * frame_area as f64).ceil() as usize).max(1)
    }

    fn describe(&self, component: &Component, frame: &AnalysisFrame) -> Option<FeatureDescriptor> {
        let moments = ShapeMoments::from_pixels(&component.pixels)?;
        let bounding_box = bounding_box(component)?;
        let (w, h) = (frame.width(), frame.height());

        let area_ratio = moments.count as f64 / frame.area() as f64;
        let fill = moments.count as f64 / bounding_box.area().max(1) as f64;
        let size_score = (area_ratio / self.target_area_ratio).min(1.0);
        let confidence = (size_score * (0.5 + 0.5 * fill)).clamp(0.0, 1.0);

        Some(FeatureDescriptor {
            subject_found: true,
            centroid: (moments.cx, moments.cy),
            offset: (
                normalized_offset(moments.cx, w),
                normalized_offset(moments.cy, h),
            ),
            bounding_box,
            orientation: moments.lean(),
            elongation: moments.elongation(),
            area_ratio,
            confidence,
            frame_size: (w, h),
        })
    }
}

impl Default for SilhouetteExtractor {
    fn default() -> Self {
        Self::new(
            SegmentationPolicy::Auto,
            SegmentationParams::default(),
            DEFAULT_MIN_AREA_RATIO,
            DEFAULT_TARGET_AREA_RATIO,
        )
    }
}

impl FeatureExtractor for SilhouetteExtractor {
    fn extract(&self, frame: &AnalysisFrame) -> FeatureDescriptor {
        let frame_size = (frame.width(), frame.height());
        let mask = segment(frame, self.policy, self.params);

        let Some(component) = largest_component(&mask) else {
            log::debug!("No foreground pixels");
            return FeatureDescriptor::no_subject(frame_size);
        };

        let min_area = self.min_area(frame.area());
        if component.area() < min_area {
            log::debug!(
                "Largest region too small: {} px < {} px",
                component.area(),
                min_area
            );
            return FeatureDescriptor::no_subject(frame_size);
        }

        match self.describe(&component, frame) {
            Some(descriptor) => {
                log::debug!(
                    "Subject at ({:.1}, {:.1}) lean {:.1}deg elongation {:.2} confidence {:.2}",
                    descriptor.centroid.0,
                    descriptor.centroid.1,
                    descriptor.orientation.to_degrees(),
                    descriptor.elongation,
                    descriptor.confidence
                );
                descriptor
            }
            None => FeatureDescriptor::no_subject(frame_size),
        }
    }
}

fn normalized_offset(coord: f64, extent: usize) -> f64 {
    let half = ((extent as f64 - 1.0) / 2.0).max(0.5);
    ((coord - half) / half).clamp(-1.0, 1.0)
}

fn bounding_box(component: &Component) -> Option<Region> {
    let &(first_row, first_col) = component.pixels.first()?;
    let (mut min_x, mut min_y) = (first_col, first_row);
    let (mut max_x, mut max_y) = (first_col, first_row);
    for &(r, c) in &component.pixels {
        min_x = min_x.min(c);
        min_y = min_y.min(r);
        max_x = max_x.max(c);
        max_y = max_y.max(r);
    }
    Some(Region::from_corners(
        min_x as i32,
        min_y as i32,
        max_x as i32,
        max_y as i32,
    ))
}
