use crate::domain::model::{ColorResult, Table, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Input table path, relative to the storage base directory.
    fn input_path(&self) -> &str;
    fn base_dir(&self) -> &str;
    fn row_delay(&self) -> Duration;
}

/// Existence check for an image URL. Failures are reported as `false`, never raised.
#[async_trait]
pub trait ReachabilityCheck: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}

/// Maps an image URL to its dominant colors. Total: failures yield `ColorResult::default()`.
#[async_trait]
pub trait ColorClassifier: Send + Sync {
    async fn classify(&self, image_url: &str) -> ColorResult;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Table>;
    async fn transform(&self, table: Table) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
