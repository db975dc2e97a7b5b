pub mod threshold_classifier;
