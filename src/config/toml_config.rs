use crate::utils::error::{RefinerError, Result};
use crate::utils::validation::{
    validate_file_name, validate_non_empty_string, validate_path, validate_url, Validate,
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinerConfig {
    pub refiner: RefinerSection,
    pub output: Option<OutputConfig>,
    pub upload: Option<UploadConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinerSection {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadConfig {
    pub pinata_api_key: Option<String>,
    pub pinata_api_secret: Option<String>,
    pub quicknode_api_key: Option<String>,
    pub json_endpoint: Option<String>,
    pub file_endpoint: Option<String>,
    pub gateway_url: Option<String>,
    pub key_prefix: Option<String>,
}

impl RefinerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RefinerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left
    /// as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RefinerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn output_file(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.filename.as_deref())
    }
}

impl Validate for RefinerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("refiner.name", &self.refiner.name)?;

        if let Some(path) = self.output_path() {
            validate_path("output.path", path)?;
        }
        if let Some(filename) = self.output_file() {
            validate_file_name("output.filename", filename)?;
        }

        if let Some(upload) = &self.upload {
            let endpoints = [
                ("upload.json_endpoint", &upload.json_endpoint),
                ("upload.file_endpoint", &upload.file_endpoint),
                ("upload.gateway_url", &upload.gateway_url),
            ];
            for (field, value) in endpoints {
                if let Some(url) = value {
                    validate_url(field, url)?;
                }
            }
        }

        tracing::debug!("Configuration `{}` validated", self.refiner.name);
        Ok(())
    }
}
