use crate::preprocessing::domain::analysis_frame::AnalysisFrame;
use crate::shared::error::DetectorError;
use crate::shared::frame::Frame;

/// Domain interface for turning an arbitrary input image into a
/// fixed-size [`AnalysisFrame`].
///
/// `normalize` must be deterministic for a given configuration and
/// background reference.
pub trait Preprocessor: Send {
    fn normalize(&self, frame: &Frame) -> Result<AnalysisFrame, DetectorError>;

    /// Installs (`Some`) or clears (`None`) the background reference used
    /// for background subtraction.
    fn set_background(&mut self, background: Option<&Frame>) -> Result<(), DetectorError>;

    fn has_background(&self) -> bool;
}
