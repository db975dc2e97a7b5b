use serde::{Deserialize, Serialize};

use crate::classification::domain::operating_mode::OperatingMode;

/// Decision parameters for one operating mode.
///
/// Signal: `offset_weight * offset_x + tilt_weight * tilt`. The dead-zone is
/// `[-threshold, threshold]`, boundaries included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModePolicy {
    pub offset_weight: f64,
    pub tilt_weight: f64,
    pub threshold: f64,
    pub min_confidence: f64,
}

impl ModePolicy {
    pub const POSITION: ModePolicy = ModePolicy {
        offset_weight: 1.0,
        tilt_weight: 0.0,
        threshold: 0.25,
        min_confidence: 0.20,
    };

    pub const TILT: ModePolicy = ModePolicy {
        offset_weight: 0.0,
        tilt_weight: 1.0,
        threshold: 0.30,
        min_confidence: 0.25,
    };

    pub const BLEND: ModePolicy = ModePolicy {
        offset_weight: 0.5,
        tilt_weight: 0.5,
        threshold: 0.25,
        min_confidence: 0.20,
    };

    fn validate(&self, name: &str) -> Result<(), String> {
        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(format!(
                "{name}.threshold must be >= 0, got {}",
                self.threshold
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "{name}.min_confidence must be between 0 and 1, got {}",
                self.min_confidence
            ));
        }
        if !self.offset_weight.is_finite() || !self.tilt_weight.is_finite() {
            return Err(format!("{name} weights must be finite"));
        }
        Ok(())
    }
}

impl Default for ModePolicy {
    fn default() -> Self {
        Self::BLEND
    }
}

fn default_position() -> ModePolicy {
    ModePolicy::POSITION
}

fn default_tilt() -> ModePolicy {
    ModePolicy::TILT
}

fn default_blend() -> ModePolicy {
    ModePolicy::BLEND
}

/// One [`ModePolicy`] per [`OperatingMode`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModePolicies {
    #[serde(default = "default_position", deserialize_with = "position_policy")]
    pub position: ModePolicy,
    #[serde(default = "default_tilt", deserialize_with = "tilt_policy")]
    pub tilt: ModePolicy,
    #[serde(default = "default_blend", deserialize_with = "blend_policy")]
    pub blend: ModePolicy,
}

impl Default for ModePolicies {
    fn default() -> Self {
        Self {
            position: ModePolicy::POSITION,
            tilt: ModePolicy::TILT,
            blend: ModePolicy::BLEND,
        }
    }
}

impl ModePolicies {
    pub fn get(&self, mode: OperatingMode) -> &ModePolicy {
        match mode {
            OperatingMode::Position => &self.position,
            OperatingMode::Tilt => &self.tilt,
            OperatingMode::Blend => &self.blend,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.position.validate("position")?;
        self.tilt.validate("tilt")?;
        self.blend.validate("blend")
    }
}

/// Partial policy from JSON: absent fields keep the mode's own defaults
/// rather than [`ModePolicy::default`].
#[derive(Deserialize)]
struct PartialPolicy {
    offset_weight: Option<f64>,
    tilt_weight: Option<f64>,
    threshold: Option<f64>,
    min_confidence: Option<f64>,
}

impl PartialPolicy {
    fn over(self, base: ModePolicy) -> ModePolicy {
        ModePolicy {
            offset_weight: self.offset_weight.unwrap_or(base.offset_weight),
            tilt_weight: self.tilt_weight.unwrap_or(base.tilt_weight),
            threshold: self.threshold.unwrap_or(base.threshold),
            min_confidence: self.min_confidence.unwrap_or(base.min_confidence),
        }
    }
}

fn position_policy<'de, D: serde::Deserializer<'de>>(d: D) -> Result<ModePolicy, D::Error> {
    Ok(PartialPolicy::deserialize(d)?.over(ModePolicy::POSITION))
}

fn tilt_policy<'de, D: serde::Deserializer<'de>>(d: D) -> Result<ModePolicy, D::Error> {
    Ok(PartialPolicy::deserialize(d)?.over(ModePolicy::TILT))
}

fn blend_policy<'de, D: serde::Deserializer<'de>>(d: D) -> Result<ModePolicy, D::Error> {
    Ok(PartialPolicy::deserialize(d)?.over(ModePolicy::BLEND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_get_maps_each_mode() {
        let policies = ModePolicies::default();
        assert_eq!(*policies.get(OperatingMode::Position), ModePolicy::POSITION);
        assert_eq!(*policies.get(OperatingMode::Tilt), ModePolicy::TILT);
        assert_eq!(*policies.get(OperatingMode::Blend), ModePolicy::BLEND);
    }

    #[test]
    fn test_partial_json_keeps_mode_defaults() {
        let policies: ModePolicies =
            serde_json::from_str(r#"{ "position": { "threshold": 0.4 } }"#).unwrap();
        assert_relative_eq!(policies.position.threshold, 0.4);
        assert_relative_eq!(policies.position.offset_weight, 1.0);
        assert_relative_eq!(policies.position.tilt_weight, 0.0);
        assert_eq!(policies.tilt, ModePolicy::TILT);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(ModePolicies::default().validate().is_ok());
    }

    #[test]
    fn test_negative_threshold_is_invalid() {
        let mut policies = ModePolicies::default();
        policies.tilt.threshold = -0.1;
        let err = policies.validate().unwrap_err();
        assert!(err.contains("tilt.threshold"));
    }

    #[test]
    fn test_confidence_out_of_range_is_invalid() {
        let mut policies = ModePolicies::default();
        policies.blend.min_confidence = 1.5;
        assert!(policies.validate().is_err());
    }
}
