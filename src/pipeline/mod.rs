//! Pipeline composition and configuration

pub mod config;
pub mod driver;

pub use config::PipelineConfig;
pub use driver::{create_tiles, TilePipeline};
