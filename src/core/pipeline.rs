use crate::core::{ConfigProvider, DataTransformer, Pipeline, Storage, TransformResult};
use crate::utils::error::Result;

/// Reads one preferences document through `source`, refines it and writes
/// the records as a JSON array through `storage`.
pub struct RefinePipeline<S: Storage, C: ConfigProvider, T: DataTransformer> {
    source: S,
    storage: S,
    config: C,
    transformer: T,
}

impl<S: Storage, C: ConfigProvider, T: DataTransformer> RefinePipeline<S, C, T> {
    pub fn new(source: S, storage: S, config: C, transformer: T) -> Self {
        Self {
            source,
            storage,
            config,
            transformer,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, T: DataTransformer> Pipeline for RefinePipeline<S, C, T> {
    async fn extract(&self) -> Result<serde_json::Value> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading input document from: {}", input_path);

        let bytes = self.source.read_file(input_path).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn transform(&self, data: serde_json::Value) -> Result<TransformResult> {
        let records = self.transformer.transform(&data)?;
        let json_output = serde_json::to_string_pretty(&records)?;

        Ok(TransformResult {
            records,
            json_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let file_name = self.config.output_file();
        let output_path = std::path::Path::new(self.config.output_path())
            .join(file_name)
            .display()
            .to_string();

        tracing::debug!(
            "Writing {} records ({} bytes) to storage",
            result.records.len(),
            result.json_output.len()
        );
        self.storage
            .write_file(file_name, result.json_output.as_bytes())
            .await?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transformer::PreferencesTransformer;
    use crate::domain::model::RefinedPreferencesRecord;
    use crate::utils::error::RefinerError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                RefinerError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_path: String,
        output_file: String,
    }

    impl MockConfig {
        fn new(input_path: String) -> Self {
            Self {
                input_path,
                output_path: "test_output".to_string(),
                output_file: "refined_preferences.json".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_file(&self) -> &str {
            &self.output_file
        }
    }

    async fn source_with(content: &str) -> MockStorage {
        let source = MockStorage::new();
        source
            .write_file("input.json", content.as_bytes())
            .await
            .unwrap();
        source
    }

    #[tokio::test]
    async fn test_extract_reads_through_source_storage() {
        let source = source_with(r#"{"address":"a","unixtime":1}"#).await;
        let pipeline = RefinePipeline::new(
            source,
            MockStorage::new(),
            MockConfig::new("input.json".to_string()),
            PreferencesTransformer,
        );

        let value = pipeline.extract().await.unwrap();
        assert_eq!(value["address"], "a");
    }

    #[tokio::test]
    async fn test_extract_rejects_malformed_json() {
        let source = source_with("{not json").await;
        let pipeline = RefinePipeline::new(
            source,
            MockStorage::new(),
            MockConfig::new("input.json".to_string()),
            PreferencesTransformer,
        );

        let result = pipeline.extract().await;
        assert!(matches!(result, Err(RefinerError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let pipeline = RefinePipeline::new(
            MockStorage::new(),
            MockStorage::new(),
            MockConfig::new("input.json".to_string()),
            PreferencesTransformer,
        );

        let result = pipeline.extract().await;
        assert!(matches!(result, Err(RefinerError::IoError(_))));
    }

    #[tokio::test]
    async fn test_transform_and_load() {
        let storage = MockStorage::new();
        let pipeline = RefinePipeline::new(
            MockStorage::new(),
            storage.clone(),
            MockConfig::new("unused.json".to_string()),
            PreferencesTransformer,
        );

        let result = pipeline
            .transform(serde_json::json!({
                "address": "0xABC",
                "unixtime": 1700000000,
                "preferences": {"categories": ["news"], "likes": {"news": true}}
            }))
            .await
            .unwrap();
        assert_eq!(result.records.len(), 1);

        let output_path = pipeline.load(result).await.unwrap();
        assert_eq!(output_path, "test_output/refined_preferences.json");

        let written = storage.get_file("refined_preferences.json").await.unwrap();
        let records: Vec<RefinedPreferencesRecord> = serde_json::from_slice(&written).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, "0xABC");
        assert_eq!(
            records[0].preferences,
            r#"{"categories":["news"],"likes":{"news":true}}"#
        );
    }

    #[tokio::test]
    async fn test_transform_failure_writes_nothing() {
        let storage = MockStorage::new();
        let pipeline = RefinePipeline::new(
            MockStorage::new(),
            storage.clone(),
            MockConfig::new("unused.json".to_string()),
            PreferencesTransformer,
        );

        let result = pipeline.transform(serde_json::json!({"address": 1})).await;
        assert!(matches!(result, Err(RefinerError::ValidationError { .. })));
        assert!(storage.get_file("refined_preferences.json").await.is_none());
    }
}
