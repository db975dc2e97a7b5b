pub mod annotation;
pub mod classification;
pub mod features;
pub mod ffi;
pub mod media;
pub mod pipeline;
pub mod preprocessing;
pub mod shared;

pub use classification::domain::gesture_direction::GestureDirection;
pub use classification::domain::operating_mode::OperatingMode;
pub use pipeline::detector::{Detector, DetectorState};
pub use shared::error::DetectorError;
pub use shared::frame::{Frame, PixelFormat};
