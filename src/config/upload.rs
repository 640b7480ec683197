use crate::config::toml_config::UploadConfig;
use crate::utils::error::{RefinerError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use std::env;

pub const PINATA_JSON_API_ENDPOINT: &str = "https://api.pinata.cloud/pinning/pinJSONToIPFS";
pub const QUICKNODE_FILE_API_ENDPOINT: &str =
    "https://api.quicknode.com/ipfs/rest/v1/s3/put-object";
pub const DEFAULT_GATEWAY_URL: &str = "https://ipfs.vana.org/ipfs";
pub const DEFAULT_KEY_PREFIX: &str = "prefs-refined";

/// Credentials and endpoints for the remote artifact store.
///
/// Built once at startup and passed by reference to the uploader.
/// Credentials stay optional here; their absence only becomes an error
/// when an upload is attempted.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub pinata_api_key: Option<String>,
    pub pinata_api_secret: Option<String>,
    pub quicknode_api_key: Option<String>,
    pub json_endpoint: String,
    pub file_endpoint: String,
    pub gateway_url: String,
    pub key_prefix: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            pinata_api_key: None,
            pinata_api_secret: None,
            quicknode_api_key: None,
            json_endpoint: PINATA_JSON_API_ENDPOINT.to_string(),
            file_endpoint: QUICKNODE_FILE_API_ENDPOINT.to_string(),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

/// Empty strings and unresolved `${VAR}` placeholders count as unset.
fn normalize_secret(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && !(v.starts_with("${") && v.ends_with('}')))
}

impl UploadSettings {
    pub fn from_env() -> Self {
        Self {
            pinata_api_key: normalize_secret(env::var("PINATA_API_KEY").ok()),
            pinata_api_secret: normalize_secret(env::var("PINATA_API_SECRET").ok()),
            quicknode_api_key: normalize_secret(env::var("QUICKNODE_API_KEY").ok()),
            ..Self::default()
        }
    }

    /// Values from the `[upload]` table win; anything it leaves out falls
    /// back to `self`.
    pub fn merged_with(self, config: &UploadConfig) -> Self {
        Self {
            pinata_api_key: normalize_secret(config.pinata_api_key.clone()).or(self.pinata_api_key),
            pinata_api_secret: normalize_secret(config.pinata_api_secret.clone())
                .or(self.pinata_api_secret),
            quicknode_api_key: normalize_secret(config.quicknode_api_key.clone())
                .or(self.quicknode_api_key),
            json_endpoint: config.json_endpoint.clone().unwrap_or(self.json_endpoint),
            file_endpoint: config.file_endpoint.clone().unwrap_or(self.file_endpoint),
            gateway_url: config.gateway_url.clone().unwrap_or(self.gateway_url),
            key_prefix: config.key_prefix.clone().unwrap_or(self.key_prefix),
        }
    }

    pub fn pinata_credentials(&self) -> Result<(&str, &str)> {
        match (&self.pinata_api_key, &self.pinata_api_secret) {
            (Some(key), Some(secret)) => Ok((key.as_str(), secret.as_str())),
            _ => Err(RefinerError::CredentialError {
                message: "Pinata IPFS API credentials not found, please check PINATA_API_KEY and PINATA_API_SECRET"
                    .to_string(),
            }),
        }
    }

    pub fn quicknode_api_key(&self) -> Result<&str> {
        self.quicknode_api_key
            .as_deref()
            .ok_or_else(|| RefinerError::CredentialError {
                message: "QuickNode IPFS API key not found, please check QUICKNODE_API_KEY"
                    .to_string(),
            })
    }

    pub fn gateway_link(&self, cid: &str) -> String {
        format!("{}/{}", self.gateway_url.trim_end_matches('/'), cid)
    }
}

impl Validate for UploadSettings {
    fn validate(&self) -> Result<()> {
        validate_url("upload.json_endpoint", &self.json_endpoint)?;
        validate_url("upload.file_endpoint", &self.file_endpoint)?;
        validate_url("upload.gateway_url", &self.gateway_url)?;
        validate_non_empty_string("upload.key_prefix", &self.key_prefix)?;
        Ok(())
    }
}
