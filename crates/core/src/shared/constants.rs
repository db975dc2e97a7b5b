/// Canonical analysis resolution (4:3, matching a 640x480 capture preset).
pub const ANALYSIS_WIDTH: u32 = 160;
pub const ANALYSIS_HEIGHT: u32 = 120;

/// Min |luma - border median| for a pixel to count as foreground.
pub const DEFAULT_CONTRAST_THRESHOLD: u8 = 40;
/// Min |luma - background reference| for a pixel to count as foreground.
pub const DEFAULT_BACKGROUND_THRESHOLD: u8 = 30;

/// Smallest region (fraction of frame area) accepted as a hand.
pub const DEFAULT_MIN_AREA_RATIO: f64 = 0.02;
/// Region size (fraction of frame area) at which the size score saturates.
pub const DEFAULT_TARGET_AREA_RATIO: f64 = 0.10;

/// BT.601 Cb/Cr skin-tone box.
pub const SKIN_CB_RANGE: (u8, u8) = (77, 127);
pub const SKIN_CR_RANGE: (u8, u8) = (133, 173);

pub const CONFIG_DIR_NAME: &str = "HandGesture";
pub const CONFIG_FILE_NAME: &str = "detector.json";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
