use std::time::Instant;

use crate::annotation::domain::frame_annotator::{FrameAnnotator, NoopAnnotator};
use crate::annotation::infrastructure::overlay_annotator::OverlayAnnotator;
use crate::classification::domain::gesture_classifier::GestureClassifier;
use crate::classification::domain::gesture_direction::GestureDirection;
use crate::classification::domain::operating_mode::OperatingMode;
use crate::classification::infrastructure::threshold_classifier::ThresholdClassifier;
use crate::features::domain::feature_descriptor::FeatureDescriptor;
use crate::features::domain::feature_extractor::FeatureExtractor;
use crate::features::infrastructure::silhouette_extractor::SilhouetteExtractor;
use crate::pipeline::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use crate::preprocessing::domain::preprocessor::Preprocessor;
use crate::preprocessing::infrastructure::canonical_preprocessor::CanonicalPreprocessor;
use crate::shared::config::DetectorConfig;
use crate::shared::error::{ConfigError, DetectorError};
use crate::shared::frame::{Frame, PixelFormat};

/// Lifecycle of a [`Detector`]. `Detecting` is only observable while a
/// call is in flight; a failed call restores the previous state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetectorState {
    #[default]
    Idle,
    Detecting,
    Ready,
}

/// Stateful hand-direction detector: preprocess → extract → classify →
/// annotate.
///
/// Holds the most recent verdict until the next successful call. A failed
/// call leaves the verdict and descriptor untouched. One instance serves one
/// caller at a time; it is `Send` but not shared.
pub struct Detector {
    preprocessor: Box<dyn Preprocessor>,
    extractor: Box<dyn FeatureExtractor>,
    classifier: Box<dyn GestureClassifier>,
    annotator: Box<dyn FrameAnnotator>,
    logger: Box<dyn PipelineLogger>,
    state: DetectorState,
    verdict: GestureDirection,
    last_descriptor: Option<FeatureDescriptor>,
    frames_processed: usize,
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

impl Detector {
    pub fn new() -> Self {
        Self::build(&DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &DetectorConfig) -> Self {
        let annotator: Box<dyn FrameAnnotator> = if config.annotate {
            Box::new(OverlayAnnotator::default())
        } else {
            Box::new(NoopAnnotator)
        };
        Self::from_parts(
            Box::new(CanonicalPreprocessor::new(
                config.analysis_width,
                config.analysis_height,
            )),
            Box::new(SilhouetteExtractor::from_config(config)),
            Box::new(ThresholdClassifier::from_config(config)),
            annotator,
        )
    }

    /// Assembles a detector from custom stages.
    pub fn from_parts(
        preprocessor: Box<dyn Preprocessor>,
        extractor: Box<dyn FeatureExtractor>,
        classifier: Box<dyn GestureClassifier>,
        annotator: Box<dyn FrameAnnotator>,
    ) -> Self {
        Self {
            preprocessor,
            extractor,
            classifier,
            annotator,
            logger: Box::new(NullPipelineLogger),
            state: DetectorState::Idle,
            verdict: GestureDirection::None,
            last_descriptor: None,
            frames_processed: 0,
        }
    }

    pub fn with_logger(mut self, logger: Box<dyn PipelineLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Classifies `image` under the mode with integer code `mode` and
    /// returns an annotated copy with the same dimensions and format.
    pub fn detect_gesture(&mut self, image: &Frame, mode: i32) -> Result<Frame, DetectorError> {
        let mode = OperatingMode::try_from(mode)?;
        self.detect_gesture_with_mode(image, mode)
    }

    /// Like [`Self::detect_gesture`], for callers holding a raw buffer.
    /// Empty or inconsistent buffers are rejected without touching state.
    pub fn detect_gesture_raw(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
        mode: i32,
    ) -> Result<Frame, DetectorError> {
        let mode = OperatingMode::try_from(mode)?;
        let frame = Frame::new(data.to_vec(), width, height, format)?;
        self.detect_gesture_with_mode(&frame, mode)
    }

    pub fn detect_gesture_with_mode(
        &mut self,
        image: &Frame,
        mode: OperatingMode,
    ) -> Result<Frame, DetectorError> {
        let previous = self.state;
        self.state = DetectorState::Detecting;

        match self.run(image, mode) {
            Ok((out, descriptor, direction)) => {
                self.verdict = direction;
                self.last_descriptor = Some(descriptor);
                self.state = DetectorState::Ready;
                self.frames_processed += 1;
                self.logger.progress(self.frames_processed, 0);
                Ok(out)
            }
            Err(e) => {
                self.state = previous;
                log::warn!(
                    "Detection failed, keeping previous verdict {}: {e}",
                    self.verdict
                );
                Err(e)
            }
        }
    }

    fn run(
        &mut self,
        image: &Frame,
        mode: OperatingMode,
    ) -> Result<(Frame, FeatureDescriptor, GestureDirection), DetectorError> {
        let start = Instant::now();
        let analysis = self.preprocessor.normalize(image)?;
        self.logger.timing("preprocess", elapsed_ms(start));

        let start = Instant::now();
        let descriptor = self.extractor.extract(&analysis);
        self.logger.timing("extract", elapsed_ms(start));

        let start = Instant::now();
        let direction = self.classifier.classify(&descriptor, mode);
        self.logger.timing("classify", elapsed_ms(start));

        let start = Instant::now();
        let mut out = image.clone();
        self.annotator.annotate(&mut out, &descriptor, direction)?;
        self.logger.timing("annotate", elapsed_ms(start));

        if descriptor.has_subject() {
            self.logger.metric("confidence", descriptor.confidence);
            self.logger.metric("area_ratio", descriptor.area_ratio);
        }
        log::debug!("{mode} mode verdict: {direction}");
        Ok((out, descriptor, direction))
    }

    /// Most recent verdict; `None` until the first successful call.
    pub fn gesture_type(&self) -> GestureDirection {
        self.verdict
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn last_descriptor(&self) -> Option<&FeatureDescriptor> {
        self.last_descriptor.as_ref()
    }

    pub fn frames_processed(&self) -> usize {
        self.frames_processed
    }

    /// Installs or clears the static-scene reference for background
    /// subtraction.
    pub fn set_background(&mut self, background: Option<&Frame>) -> Result<(), DetectorError> {
        self.preprocessor.set_background(background)?;
        self.logger.info(match background {
            Some(_) => "Background reference set",
            None => "Background reference cleared",
        });
        Ok(())
    }

    pub fn has_background(&self) -> bool {
        self.preprocessor.has_background()
    }

    /// Forgets the last verdict. The background reference is kept.
    pub fn reset(&mut self) {
        self.state = DetectorState::Idle;
        self.verdict = GestureDirection::None;
        self.last_descriptor = None;
    }

    pub fn log_summary(&self) {
        self.logger.summary();
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}
