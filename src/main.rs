use clap::Parser;
use pigment_scrape::utils::{logger, validation::Validate};
use pigment_scrape::{CliConfig, ColorPipeline, LocalStorage, ScrapeEngine};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting pigment-scrape");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = match ColorPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("Pipeline setup failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let engine = ScrapeEngine::new(pipeline);
    match engine.run().await {
        Ok(report) => {
            println!("Wrote {} with {} colors", report.output_path, report.records);
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
