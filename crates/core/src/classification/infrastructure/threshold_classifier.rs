use crate::classification::domain::gesture_classifier::GestureClassifier;
use crate::classification::domain::gesture_direction::GestureDirection;
use crate::classification::domain::mode_policy::{ModePolicies, ModePolicy};
use crate::classification::domain::operating_mode::OperatingMode;
use crate::features::domain::feature_descriptor::FeatureDescriptor;
use crate::shared::config::DetectorConfig;

/// Rule-based classifier: a weighted geometric signal compared against a
/// symmetric dead-zone.
pub struct ThresholdClassifier {
    policies: ModePolicies,
    mirrored: bool,
}

impl ThresholdClassifier {
    pub fn new(policies: ModePolicies, mirrored: bool) -> Self {
        Self { policies, mirrored }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(config.modes, config.mirrored)
    }
}

/// Signed decision signal in camera coordinates, positive toward +x.
fn decision_signal(descriptor: &FeatureDescriptor, policy: &ModePolicy) -> f64 {
    policy.offset_weight * descriptor.offset.0 + policy.tilt_weight * descriptor.tilt()
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self::new(ModePolicies::default(), false)
    }
}

impl GestureClassifier for ThresholdClassifier {
    fn classify(&self, descriptor: &FeatureDescriptor, mode: OperatingMode) -> GestureDirection {
        if !descriptor.has_subject() {
            return GestureDirection::None;
        }

        let policy = self.policies.get(mode);
        if descriptor.confidence < policy.min_confidence {
            log::debug!(
                "Confidence {:.2} below {:.2} for {mode} mode",
                descriptor.confidence,
                policy.min_confidence
            );
            return GestureDirection::None;
        }

        let signal = decision_signal(descriptor, policy);
        let camera = if signal > policy.threshold {
            GestureDirection::Right
        } else if signal < -policy.threshold {
            GestureDirection::Left
        } else {
            GestureDirection::None
        };
        let direction = if self.mirrored {
            camera.mirrored()
        } else {
            camera
        };
        log::debug!(
            "{mode} signal {signal:+.3} (threshold {:.3}) -> {direction}",
            policy.threshold
        );
        direction
    }
}
