pub mod feature_descriptor;
pub mod feature_extractor;
pub mod segmentation_policy;
