pub mod detector;
pub mod pipeline_logger;
