use crate::core::{ArtifactStore, Pipeline};
use crate::domain::model::RefinedPreferencesRecord;
use crate::utils::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub records: Vec<RefinedPreferencesRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub json_cid: String,
    pub file_cid: String,
}

pub struct RefinerEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RefinerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting refinement...");

        tracing::info!("Extracting input document...");
        let raw = self.pipeline.extract().await?;

        tracing::info!("Transforming document...");
        let result = self.pipeline.transform(raw).await?;
        let records = result.records.clone();
        tracing::info!("Transformed {} records", records.len());

        tracing::info!("Loading records...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            records,
        })
    }

    /// Pushes the refined records and the written output file to `store`.
    /// Stops at the first failed upload.
    pub async fn publish<A: ArtifactStore>(
        &self,
        summary: &RunSummary,
        store: &A,
    ) -> Result<PublishReceipt> {
        let document = serde_json::to_value(&summary.records)?;
        let json_cid = store.upload_json(&document).await?;
        let file_cid = store.upload_file(Path::new(&summary.output_path)).await?;

        Ok(PublishReceipt { json_cid, file_cid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TransformResult;
    use crate::utils::error::RefinerError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedPipeline {
        fail_transform: bool,
        loaded: Mutex<Vec<String>>,
    }

    impl FixedPipeline {
        fn new(fail_transform: bool) -> Self {
            Self {
                fail_transform,
                loaded: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Pipeline for FixedPipeline {
        async fn extract(&self) -> Result<serde_json::Value> {
            Ok(serde_json::json!({"address": "a"}))
        }

        async fn transform(&self, _data: serde_json::Value) -> Result<TransformResult> {
            if self.fail_transform {
                return Err(RefinerError::validation("unixtime", "integer", "missing"));
            }
            Ok(TransformResult {
                records: vec![RefinedPreferencesRecord {
                    address: "a".to_string(),
                    unixtime: 1,
                    preferences: r#"{"categories":[],"likes":{}}"#.to_string(),
                }],
                json_output: "[]".to_string(),
            })
        }

        async fn load(&self, result: TransformResult) -> Result<String> {
            self.loaded.lock().unwrap().push(result.json_output);
            Ok("out/refined_preferences.json".to_string())
        }
    }

    struct RecordingStore {
        uploads: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ArtifactStore for RecordingStore {
        async fn upload_json(&self, data: &serde_json::Value) -> Result<String> {
            self.uploads.lock().unwrap().push(data.to_string());
            Ok("json-cid".to_string())
        }

        async fn upload_file(&self, path: &Path) -> Result<String> {
            self.uploads.lock().unwrap().push(path.display().to_string());
            Ok("file-cid".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_returns_summary() {
        let engine = RefinerEngine::new(FixedPipeline::new(false));
        let summary = engine.run().await.unwrap();

        assert_eq!(summary.output_path, "out/refined_preferences.json");
        assert_eq!(summary.records.len(), 1);
        assert_eq!(engine.pipeline.loaded.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_before_load_on_failure() {
        let engine = RefinerEngine::new(FixedPipeline::new(true));
        let result = engine.run().await;

        assert!(matches!(result, Err(RefinerError::ValidationError { .. })));
        assert!(engine.pipeline.loaded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_publish_uploads_records_and_file() {
        let engine = RefinerEngine::new(FixedPipeline::new(false));
        let summary = engine.run().await.unwrap();
        let store = RecordingStore {
            uploads: Mutex::new(Vec::new()),
        };

        let receipt = engine.publish(&summary, &store).await.unwrap();
        assert_eq!(
            receipt,
            PublishReceipt {
                json_cid: "json-cid".to_string(),
                file_cid: "file-cid".to_string(),
            }
        );

        let uploads = store.uploads.lock().unwrap();
        assert!(uploads[0].contains("\"address\":\"a\""));
        assert_eq!(uploads[1], "out/refined_preferences.json");
    }
}
