pub mod canonical_preprocessor;
pub mod color;
mod resample;
