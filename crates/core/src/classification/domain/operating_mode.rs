use crate::shared::error::DetectorError;

/// Caller-selected decision policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatingMode {
    /// Horizontal position of the hand in the frame.
    Position,
    /// Lean of the hand's principal axis.
    Tilt,
    /// Weighted mix of position and tilt.
    Blend,
}

impl OperatingMode {
    pub const ALL: &[OperatingMode] = &[
        OperatingMode::Position,
        OperatingMode::Tilt,
        OperatingMode::Blend,
    ];

    pub fn code(self) -> i32 {
        match self {
            OperatingMode::Position => 0,
            OperatingMode::Tilt => 1,
            OperatingMode::Blend => 2,
        }
    }
}

impl TryFrom<i64> for OperatingMode {
    type Error = DetectorError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OperatingMode::Position),
            1 => Ok(OperatingMode::Tilt),
            2 => Ok(OperatingMode::Blend),
            other => Err(DetectorError::UnsupportedMode(other)),
        }
    }
}

impl TryFrom<i32> for OperatingMode {
    type Error = DetectorError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(value as i64)
    }
}

impl std::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatingMode::Position => write!(f, "position"),
            OperatingMode::Tilt => write!(f, "tilt"),
            OperatingMode::Blend => write!(f, "blend"),
        }
    }
}
