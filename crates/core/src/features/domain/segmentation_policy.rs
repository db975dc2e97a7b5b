use serde::{Deserialize, Serialize};

/// How foreground (hand) pixels are separated from the background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationPolicy {
    /// Background difference when a reference is set, else luminance contrast.
    #[default]
    Auto,
    /// Pixels far from the median border luminance.
    LuminanceContrast,
    /// Pixels inside the Cb/Cr skin box. Luma-only frames fall back to
    /// luminance contrast.
    SkinTone,
    /// Pixels that changed against the background reference. Falls back to
    /// luminance contrast when no reference is set.
    BackgroundDifference,
}

impl SegmentationPolicy {
    pub const ALL: &[SegmentationPolicy] = &[
        SegmentationPolicy::Auto,
        SegmentationPolicy::LuminanceContrast,
        SegmentationPolicy::SkinTone,
        SegmentationPolicy::BackgroundDifference,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SegmentationPolicy::Auto => "auto",
            SegmentationPolicy::LuminanceContrast => "luminance_contrast",
            SegmentationPolicy::SkinTone => "skin_tone",
            SegmentationPolicy::BackgroundDifference => "background_difference",
        }
    }
}

impl std::fmt::Display for SegmentationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SegmentationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|p| p.name()).collect();
                format!(
                    "unknown segmentation '{s}', expected one of: {}",
                    names.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_names() {
        for &policy in SegmentationPolicy::ALL {
            assert_eq!(policy.name().parse::<SegmentationPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_parse_unknown_lists_choices() {
        let err = "edges".parse::<SegmentationPolicy>().unwrap_err();
        assert!(err.contains("skin_tone"));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&SegmentationPolicy::BackgroundDifference).unwrap();
        assert_eq!(json, "\"background_difference\"");
    }
}
