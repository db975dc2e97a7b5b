pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod region;

#[cfg(test)]
pub(crate) mod test_support;
