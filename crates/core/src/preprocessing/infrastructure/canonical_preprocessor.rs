use ndarray::{Array2, Zip};

use crate::preprocessing::domain::analysis_frame::{AnalysisFrame, ChromaPlanes};
use crate::preprocessing::domain::preprocessor::Preprocessor;
use crate::shared::constants::{ANALYSIS_HEIGHT, ANALYSIS_WIDTH};
use crate::shared::error::DetectorError;
use crate::shared::frame::{validate_layout, Frame};

use super::color::split_planes;
use super::resample::resize_plane;

/// Reduces any supported frame to luma (+ chroma) planes at a fixed
/// analysis resolution, optionally diffed against a background reference.
pub struct CanonicalPreprocessor {
    width: usize,
    height: usize,
    background: Option<Array2<u8>>,
}

impl CanonicalPreprocessor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as usize,
            height: height.max(1) as usize,
            background: None,
        }
    }

    pub fn analysis_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn reduce(&self, frame: &Frame) -> Result<(Array2<u8>, Option<ChromaPlanes>), DetectorError> {
        validate_layout(
            frame.data().len(),
            frame.width(),
            frame.height(),
            frame.format(),
        )?;

        let (luma, chroma) = split_planes(frame);
        let luma = resize_plane(luma.view(), self.width, self.height);
        let chroma = chroma.map(|c| ChromaPlanes {
            cb: resize_plane(c.cb.view(), self.width, self.height),
            cr: resize_plane(c.cr.view(), self.width, self.height),
        });
        Ok((luma, chroma))
    }
}

impl Default for CanonicalPreprocessor {
    fn default() -> Self {
        Self::new(ANALYSIS_WIDTH, ANALYSIS_HEIGHT)
    }
}

impl Preprocessor for CanonicalPreprocessor {
    fn normalize(&self, frame: &Frame) -> Result<AnalysisFrame, DetectorError> {
        let (luma, chroma) = self.reduce(frame)?;
        let difference = self.background.as_ref().map(|bg| {
            Zip::from(&luma)
                .and(bg)
                .map_collect(|&current, &reference| current.abs_diff(reference))
        });

        log::trace!(
            "Normalized {}x{} {:?} frame to {}x{} (background: {})",
            frame.width(),
            frame.height(),
            frame.format(),
            self.width,
            self.height,
            difference.is_some()
        );

        Ok(AnalysisFrame::new(
            luma,
            chroma,
            difference,
            frame.width(),
            frame.height(),
        ))
    }

    fn set_background(&mut self, background: Option<&Frame>) -> Result<(), DetectorError> {
        self.background = match background {
            Some(frame) => Some(self.reduce(frame)?.0),
            None => None,
        };
        Ok(())
    }

    fn has_background(&self) -> bool {
        self.background.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::PixelFormat;
    use crate::shared::test_support::{blank, hand_right};
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::luma(PixelFormat::Luma8)]
    #[case::rgb(PixelFormat::Rgb8)]
    #[case::rgba(PixelFormat::Rgba8)]
    #[case::bgra(PixelFormat::Bgra8)]
    fn test_output_size_is_fixed(#[case] format: PixelFormat) {
        let pre = CanonicalPreprocessor::default();
        for (w, h) in [(640, 480), (33, 17), (1, 1), (1280, 720)] {
            let input = blank(w, h, format, 90);
            let frame = pre.normalize(&input).unwrap();
            assert_eq!((frame.width(), frame.height()), (160, 120));
            assert_eq!(frame.source_size(), (w, h));
            assert_eq!(frame.chroma().is_some(), format.is_color());
        }
    }

    #[test]
    fn test_uniform_frame_maps_to_uniform_luma() {
        let pre = CanonicalPreprocessor::new(40, 30);
        let input = blank(400, 300, PixelFormat::Rgb8, 90);
        let frame = pre.normalize(&input).unwrap();
        assert!(frame.luma().iter().all(|&v| v == 90));
        let chroma = frame.chroma().unwrap();
        assert!(chroma.cb.iter().all(|&v| v == 128));
        assert!(chroma.cr.iter().all(|&v| v == 128));
    }

    #[test]
    fn test_identical_input_identical_output() {
        let pre = CanonicalPreprocessor::default();
        let input = hand_right(PixelFormat::Bgra8);
        let first = pre.normalize(&input).unwrap();
        assert_eq!(pre.normalize(&input).unwrap(), first);
    }

    #[test]
    fn test_no_background_means_no_difference_plane() {
        let pre = CanonicalPreprocessor::default();
        let input = blank(64, 48, PixelFormat::Luma8, 10);
        let frame = pre.normalize(&input).unwrap();
        assert!(frame.difference().is_none());
        assert!(!pre.has_background());
    }

    #[test]
    fn test_background_difference() {
        let mut pre = CanonicalPreprocessor::new(16, 12);
        let background = blank(64, 48, PixelFormat::Luma8, 100);
        pre.set_background(Some(&background)).unwrap();
        assert!(pre.has_background());

        let input = blank(64, 48, PixelFormat::Luma8, 130);
        let frame = pre.normalize(&input).unwrap();
        let diff = frame.difference().unwrap();
        assert!(diff.iter().all(|&v| v == 30));

        pre.set_background(None).unwrap();
        assert!(!pre.has_background());
    }

    #[test]
    fn test_background_may_differ_in_size_and_format() {
        let mut pre = CanonicalPreprocessor::new(16, 12);
        let background = blank(32, 24, PixelFormat::Rgb8, 50);
        pre.set_background(Some(&background)).unwrap();
        let input = blank(640, 480, PixelFormat::Luma8, 50);
        let frame = pre.normalize(&input).unwrap();
        assert!(frame.difference().unwrap().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_scale_back_to_source() {
        let pre = CanonicalPreprocessor::default();
        let input = blank(640, 480, PixelFormat::Luma8, 0);
        let frame = pre.normalize(&input).unwrap();
        let (sx, sy) = frame.scale_to_source();
        assert_relative_eq!(sx, 4.0);
        assert_relative_eq!(sy, 4.0);
    }
}
