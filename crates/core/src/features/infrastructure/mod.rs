pub mod components;
pub mod moments;
pub mod segmentation;
pub mod silhouette_extractor;
