use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classification::domain::mode_policy::ModePolicies;
use crate::features::domain::segmentation_policy::SegmentationPolicy;
use crate::shared::constants::{
    ANALYSIS_HEIGHT, ANALYSIS_WIDTH, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
    DEFAULT_BACKGROUND_THRESHOLD, DEFAULT_CONTRAST_THRESHOLD, DEFAULT_MIN_AREA_RATIO,
    DEFAULT_TARGET_AREA_RATIO,
};
use crate::shared::error::ConfigError;

/// Tunables for every pipeline stage. Missing JSON fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub analysis_width: u32,
    pub analysis_height: u32,
    pub segmentation: SegmentationPolicy,
    pub contrast_threshold: u8,
    pub background_threshold: u8,
    pub min_area_ratio: f64,
    pub target_area_ratio: f64,
    /// Front-camera (selfie) view: left and right are swapped.
    pub mirrored: bool,
    /// Draw the detected region onto the returned image.
    pub annotate: bool,
    pub modes: ModePolicies,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            analysis_width: ANALYSIS_WIDTH,
            analysis_height: ANALYSIS_HEIGHT,
            segmentation: SegmentationPolicy::Auto,
            contrast_threshold: DEFAULT_CONTRAST_THRESHOLD,
            background_threshold: DEFAULT_BACKGROUND_THRESHOLD,
            min_area_ratio: DEFAULT_MIN_AREA_RATIO,
            target_area_ratio: DEFAULT_TARGET_AREA_RATIO,
            mirrored: false,
            annotate: true,
            modes: ModePolicies::default(),
        }
    }
}

impl DetectorConfig {
    /// `<platform config dir>/HandGesture/detector.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DetectorConfig =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::info!("Loaded detector config from {}", path.display());
        Ok(config)
    }

    /// Loads from [`Self::default_path`], falling back to defaults when the
    /// file is missing or unusable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path().filter(|p| p.exists()) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(write_err)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis_width < 2 || self.analysis_height < 2 {
            return Err(ConfigError::Invalid(format!(
                "analysis size must be at least 2x2, got {}x{}",
                self.analysis_width, self.analysis_height
            )));
        }
        if !(0.0..1.0).contains(&self.min_area_ratio) {
            return Err(ConfigError::Invalid(format!(
                "min_area_ratio must be in [0, 1), got {}",
                self.min_area_ratio
            )));
        }
        if !(self.target_area_ratio > 0.0 && self.target_area_ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "target_area_ratio must be in (0, 1], got {}",
                self.target_area_ratio
            )));
        }
        self.modes.validate().map_err(ConfigError::Invalid)
    }
}
