use crate::features::domain::feature_descriptor::FeatureDescriptor;
use crate::preprocessing::domain::analysis_frame::AnalysisFrame;

/// Domain interface for locating the hand in an analysis frame.
///
/// Absence of a hand is a normal outcome: implementations return
/// [`FeatureDescriptor::no_subject`] rather than failing.
pub trait FeatureExtractor: Send {
    fn extract(&self, frame: &AnalysisFrame) -> FeatureDescriptor;
}
