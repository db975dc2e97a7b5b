use crate::classification::domain::gesture_direction::GestureDirection;
use crate::classification::domain::operating_mode::OperatingMode;
use crate::features::domain::feature_descriptor::FeatureDescriptor;

/// Domain interface for the decision rule.
///
/// Implementations must be deterministic: the same descriptor and mode
/// always yield the same direction. A learned model can stand in for the
/// rule-based classifier behind this trait.
pub trait GestureClassifier: Send {
    fn classify(&self, descriptor: &FeatureDescriptor, mode: OperatingMode) -> GestureDirection;
}
