use crate::domain::model::{RawRow, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Write-only sink for the emitted artifact. The pipeline never reads
/// back what it wrote.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn sources(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawRow>>;
    async fn transform(&self, rows: Vec<RawRow>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
