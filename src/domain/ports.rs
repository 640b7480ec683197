use crate::domain::model::{RefinedPreferencesRecord, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
}

/// Turns one raw document into records. Implementations are pure.
pub trait DataTransformer: Send + Sync {
    fn transform(&self, data: &serde_json::Value) -> Result<Vec<RefinedPreferencesRecord>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<serde_json::Value>;
    async fn transform(&self, data: serde_json::Value) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}

/// Content-addressed remote store. Both calls return the content id.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn upload_json(&self, data: &serde_json::Value) -> Result<String>;
    async fn upload_file(&self, path: &Path) -> Result<String>;
}
