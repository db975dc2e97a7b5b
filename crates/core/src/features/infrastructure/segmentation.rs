use ndarray::{Array2, Zip};

use crate::features::domain::segmentation_policy::SegmentationPolicy;
use crate::preprocessing::domain::analysis_frame::AnalysisFrame;
use crate::shared::constants::{
    DEFAULT_BACKGROUND_THRESHOLD, DEFAULT_CONTRAST_THRESHOLD, SKIN_CB_RANGE, SKIN_CR_RANGE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentationParams {
    pub contrast_threshold: u8,
    pub background_threshold: u8,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            contrast_threshold: DEFAULT_CONTRAST_THRESHOLD,
            background_threshold: DEFAULT_BACKGROUND_THRESHOLD,
        }
    }
}

/// Resolves `Auto` and unavailable inputs to the policy actually applied.
pub fn effective_policy(policy: SegmentationPolicy, frame: &AnalysisFrame) -> SegmentationPolicy {
    match policy {
        SegmentationPolicy::Auto | SegmentationPolicy::BackgroundDifference
            if frame.difference().is_some() =>
        {
            SegmentationPolicy::BackgroundDifference
        }
        SegmentationPolicy::SkinTone if frame.chroma().is_some() => SegmentationPolicy::SkinTone,
        SegmentationPolicy::Auto => SegmentationPolicy::LuminanceContrast,
        SegmentationPolicy::LuminanceContrast => SegmentationPolicy::LuminanceContrast,
        requested => {
            log::debug!(
                "{requested} segmentation unavailable for this frame, using luminance contrast"
            );
            SegmentationPolicy::LuminanceContrast
        }
    }
}

/// Foreground mask, `true` where a pixel belongs to a candidate hand.
pub fn segment(
    frame: &AnalysisFrame,
    policy: SegmentationPolicy,
    params: SegmentationParams,
) -> Array2<bool> {
    match effective_policy(policy, frame) {
        SegmentationPolicy::BackgroundDifference => match frame.difference() {
            Some(diff) => diff.mapv(|d| d > params.background_threshold),
            None => luminance_contrast(frame.luma(), params.contrast_threshold),
        },
        SegmentationPolicy::SkinTone => match frame.chroma() {
            Some(chroma) => Zip::from(&chroma.cb)
                .and(&chroma.cr)
                .map_collect(|&cb, &cr| is_skin(cb, cr)),
            None => luminance_contrast(frame.luma(), params.contrast_threshold),
        },
        _ => luminance_contrast(frame.luma(), params.contrast_threshold),
    }
}

fn is_skin(cb: u8, cr: u8) -> bool {
    in_range(cb, SKIN_CB_RANGE) && in_range(cr, SKIN_CR_RANGE)
}

fn in_range(v: u8, (lo, hi): (u8, u8)) -> bool {
    (lo..=hi).contains(&v)
}

fn luminance_contrast(luma: &Array2<u8>, threshold: u8) -> Array2<bool> {
    let level = border_median(luma);
    luma.mapv(|v| v.abs_diff(level) > threshold)
}

/// Median luminance of the outermost ring of pixels, taken as the
/// background level.
pub fn border_median(luma: &Array2<u8>) -> u8 {
    let (h, w) = luma.dim();
    let edge = |r: usize, c: usize| r == 0 || c == 0 || r + 1 == h || c + 1 == w;
    let mut border: Vec<u8> = luma
        .indexed_iter()
        .filter(|&((r, c), _)| edge(r, c))
        .map(|(_, &v)| v)
        .collect();
    if border.is_empty() {
        return 0;
    }
    let mid = border.len() / 2;
    *border.select_nth_unstable(mid).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::domain::analysis_frame::ChromaPlanes;
    use ndarray::Array2;

    fn segment_default(frame: &AnalysisFrame, policy: SegmentationPolicy) -> Array2<bool> {
        segment(frame, policy, SegmentationParams::default())
    }

    fn luma_with_square(value: u8, background: u8) -> Array2<u8> {
        let mut luma = Array2::from_elem((20, 20), background);
        for r in 5..10 {
            for c in 5..10 {
                luma[[r, c]] = value;
            }
        }
        luma
    }

    #[test]
    fn test_border_median_ignores_interior() {
        let luma = luma_with_square(250, 30);
        assert_eq!(border_median(&luma), 30);
    }

    #[test]
    fn test_uniform_frame_has_empty_mask() {
        let frame = AnalysisFrame::from_luma(Array2::from_elem((12, 16), 140));
        let mask = segment_default(&frame, SegmentationPolicy::Auto);
        assert!(mask.iter().all(|&m| !m));
    }

    #[test]
    fn test_contrast_detects_bright_and_dark_subjects() {
        let params = SegmentationParams::default();
        for luma in [luma_with_square(250, 30), luma_with_square(10, 200)] {
            let frame = AnalysisFrame::from_luma(luma);
            let mask = segment(&frame, SegmentationPolicy::LuminanceContrast, params);
            assert_eq!(mask.iter().filter(|&&m| m).count(), 25);
            assert!(mask[[7, 7]]);
            assert!(!mask[[0, 0]]);
        }
    }

    #[test]
    fn test_contrast_below_threshold_is_background() {
        let frame = AnalysisFrame::from_luma(luma_with_square(60, 30));
        let mask = segment_default(&frame, SegmentationPolicy::Auto);
        assert!(mask.iter().all(|&m| !m));
    }

    #[test]
    fn test_skin_tone_uses_chroma() {
        let luma = Array2::from_elem((10, 10), 128u8);
        let mut cb = Array2::from_elem((10, 10), 128u8);
        let mut cr = Array2::from_elem((10, 10), 128u8);
        cb[[3, 3]] = 105;
        cr[[3, 3]] = 155;
        let frame = AnalysisFrame::new(luma, Some(ChromaPlanes { cb, cr }), None, 10, 10);
        let mask = segment_default(&frame, SegmentationPolicy::SkinTone);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 1);
        assert!(mask[[3, 3]]);
    }

    #[test]
    fn test_skin_tone_without_chroma_falls_back() {
        let frame = AnalysisFrame::from_luma(luma_with_square(250, 30));
        assert_eq!(
            effective_policy(SegmentationPolicy::SkinTone, &frame),
            SegmentationPolicy::LuminanceContrast
        );
        let mask = segment_default(&frame, SegmentationPolicy::SkinTone);
        assert!(mask[[7, 7]]);
    }

    #[test]
    fn test_auto_prefers_background_difference() {
        let luma = Array2::from_elem((10, 10), 100u8);
        let mut diff = Array2::zeros((10, 10));
        diff[[4, 4]] = 90;
        let frame = AnalysisFrame::new(luma, None, Some(diff), 10, 10);
        assert_eq!(
            effective_policy(SegmentationPolicy::Auto, &frame),
            SegmentationPolicy::BackgroundDifference
        );
        let mask = segment_default(&frame, SegmentationPolicy::Auto);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 1);
    }

    #[test]
    fn test_background_difference_without_reference_falls_back() {
        let frame = AnalysisFrame::from_luma(luma_with_square(250, 30));
        assert_eq!(
            effective_policy(SegmentationPolicy::BackgroundDifference, &frame),
            SegmentationPolicy::LuminanceContrast
        );
    }
}
