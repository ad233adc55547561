pub mod config;
pub mod core;
pub mod domain;
pub mod sources;
pub mod utils;

pub use crate::core::{etl::ScrapeEngine, pipeline::ColorPipeline};
pub use config::{cli::LocalStorage, CliConfig};
pub use utils::error::{Result, ScrapeError};
