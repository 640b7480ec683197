use crate::config::upload::UploadSettings;
use crate::core::ArtifactStore;
use crate::utils::error::{RefinerError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::path::Path;

const UPLOAD_CONTENT_TYPE: &str = "application/json";

/// Thin client over the Pinata JSON pinning API and the QuickNode IPFS
/// object upload API. Every call is a single request; failures are surfaced
/// as they come back.
pub struct IpfsUploader<'a> {
    settings: &'a UploadSettings,
    client: Client,
}

/// Parses a 2xx body. A body that is not JSON means the endpoint answered
/// but is not the expected API.
async fn read_json_body(response: reqwest::Response) -> Result<Value> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| RefinerError::MalformedResponseError {
        message: format!("response body is not JSON: {}", e),
    })
}

impl<'a> IpfsUploader<'a> {
    pub fn new(settings: &'a UploadSettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    pub fn with_client(settings: &'a UploadSettings, client: Client) -> Self {
        Self { settings, client }
    }

    fn unique_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.settings.key_prefix,
            chrono::Utc::now().timestamp_millis(),
            rand::random_range(0..10_000u32)
        )
    }

    async fn pin_json(&self, data: &Value) -> Result<String> {
        let (api_key, api_secret) = self.settings.pinata_credentials()?;

        tracing::debug!("Pinning JSON to: {}", self.settings.json_endpoint);
        let response = self
            .client
            .post(&self.settings.json_endpoint)
            .header("pinata_api_key", api_key)
            .header("pinata_secret_api_key", api_secret)
            .json(data)
            .send()
            .await?
            .error_for_status()?;

        let result = read_json_body(response).await?;
        result
            .get("IpfsHash")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RefinerError::MalformedResponseError {
                message: "missing `IpfsHash` in pinning response".to_string(),
            })
    }

    async fn put_object(&self, path: &Path) -> Result<String> {
        let api_key = self.settings.quicknode_api_key()?;
        let body = tokio::fs::read(path).await?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let key = self.unique_key();
        tracing::debug!(
            "Uploading {} ({} bytes) as {} to: {}",
            path.display(),
            body.len(),
            key,
            self.settings.file_endpoint
        );

        let form = Form::new()
            .text("Key", key)
            .text("ContentType", UPLOAD_CONTENT_TYPE)
            .part(
                "Body",
                Part::bytes(body)
                    .file_name(file_name)
                    .mime_str(UPLOAD_CONTENT_TYPE)?,
            );

        let response = self
            .client
            .post(&self.settings.file_endpoint)
            .header("x-api-key", api_key)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let result = read_json_body(response).await?;
        result
            .pointer("/pin/cid")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RefinerError::MalformedResponseError {
                message: "missing `pin.cid` in upload response".to_string(),
            })
    }
}

#[async_trait]
impl<'a> ArtifactStore for IpfsUploader<'a> {
    async fn upload_json(&self, data: &Value) -> Result<String> {
        match self.pin_json(data).await {
            Ok(cid) => {
                tracing::info!("Successfully uploaded JSON to IPFS with hash: {}", cid);
                Ok(cid)
            }
            Err(e) => {
                tracing::error!("An error occurred while uploading JSON to IPFS: {}", e);
                Err(e)
            }
        }
    }

    async fn upload_file(&self, path: &Path) -> Result<String> {
        match self.put_object(path).await {
            Ok(cid) => {
                tracing::info!("Successfully uploaded file to IPFS with hash: {}", cid);
                Ok(cid)
            }
            Err(e) => {
                tracing::error!("An error occurred while uploading file to IPFS: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_key_format() {
        let settings = UploadSettings::default();
        let uploader = IpfsUploader::new(&settings);

        let key = uploader.unique_key();
        let parts: Vec<&str> = key.rsplitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].parse::<u32>().unwrap() < 10_000);
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2], settings.key_prefix);
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_request() {
        let settings = UploadSettings {
            quicknode_api_key: Some("key".to_string()),
            file_endpoint: "http://127.0.0.1:1/unreachable".to_string(),
            ..UploadSettings::default()
        };
        let uploader = IpfsUploader::new(&settings);

        let result = uploader
            .upload_file(Path::new("/nonexistent/refined_preferences.json"))
            .await;
        assert!(matches!(result, Err(RefinerError::IoError(_))));
    }
}
