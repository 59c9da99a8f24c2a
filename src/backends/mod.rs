//! Remote model backends.

#[cfg(feature = "bedrock")]
pub mod aws;
