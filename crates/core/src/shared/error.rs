use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the detection pipeline.
///
/// "No hand in frame" is not an error; it is reported as
/// [`GestureDirection::None`](crate::GestureDirection::None).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectorError {
    #[error("invalid image format: {0}")]
    InvalidImageFormat(String),
    #[error("unsupported operating mode: {0}")]
    UnsupportedMode(i64),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
