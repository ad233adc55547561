pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use clap::Parser;
use std::time::Duration;

const USER_AGENT: &str = concat!("pigment-scrape/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Parser)]
#[command(name = "pigment-scrape")]
#[command(about = "Scrapes the Wikipedia color lists into a phf table for the pigment crate")]
pub struct CliConfig {
    /// Directory the generated colors.rs is written into
    #[arg(long, default_value = "generated")]
    pub output_path: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    // Not a CLI flag: the page set is part of the output contract.
    #[clap(skip = crate::sources::default_sources())]
    pub sources: Vec<String>,
}

impl ConfigProvider for CliConfig {
    fn sources(&self) -> &[String] {
        &self.sources
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn user_agent(&self) -> &str {
        USER_AGENT
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for source in &self.sources {
            validate_url("sources", source)?;
        }
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("timeout_secs", self.timeout_secs, 1)?;
        Ok(())
    }
}
