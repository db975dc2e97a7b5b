pub mod analysis_frame;
pub mod preprocessor;
