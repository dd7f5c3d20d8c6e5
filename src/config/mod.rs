//! Configuration for the extraction pipeline.

mod builder;
mod getters;
mod types;

pub use builder::{ScrapeConfigBuilder, WithOutputDir};
pub use types::ScrapeConfig;
