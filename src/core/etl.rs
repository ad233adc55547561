use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct RunReport {
    pub output_path: String,
    pub records: usize,
}

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Drives the pipeline front to back. Any stage error aborts the run;
    /// nothing is written unless every source page came through.
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Fetching color pages...");
        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} candidate rows", rows.len());

        tracing::info!("Resolving lookup keys...");
        let result = self.pipeline.transform(rows).await?;
        let records = result.records.len();
        tracing::info!("Resolved {} color records", records);

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Wrote static table to {}", output_path);

        Ok(RunReport {
            output_path,
            records,
        })
    }
}
