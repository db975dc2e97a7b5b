use crate::classification::domain::gesture_direction::GestureDirection;
use crate::features::domain::feature_descriptor::FeatureDescriptor;
use crate::shared::error::DetectorError;
use crate::shared::frame::Frame;

/// Domain interface for rendering a verdict onto the display image.
///
/// Implementations modify the frame in-place (`&mut Frame`) to avoid allocation.
/// Descriptor geometry is in analysis-frame coordinates and must be scaled
/// to the frame.
pub trait FrameAnnotator: Send {
    fn annotate(
        &self,
        frame: &mut Frame,
        descriptor: &FeatureDescriptor,
        direction: GestureDirection,
    ) -> Result<(), DetectorError>;
}

/// Leaves the frame untouched.
pub struct NoopAnnotator;

impl FrameAnnotator for NoopAnnotator {
    fn annotate(
        &self,
        _frame: &mut Frame,
        _descriptor: &FeatureDescriptor,
        _direction: GestureDirection,
    ) -> Result<(), DetectorError> {
        Ok(())
    }
}
