pub mod gesture_classifier;
pub mod gesture_direction;
pub mod mode_policy;
pub mod operating_mode;
