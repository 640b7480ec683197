use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefinerError {
    #[error("Validation failed at `{path}`: expected {expected}, got {actual}")]
    ValidationError {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("Missing credentials: {message}")]
    CredentialError { message: String },

    #[error("Remote store request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Unexpected remote store response: {message}")]
    MalformedResponseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for `{field}` ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Remote,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl RefinerError {
    pub fn validation(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ValidationError {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } | Self::SerializationError(_) => ErrorCategory::Input,
            Self::TransportError(_) | Self::MalformedResponseError { .. } => ErrorCategory::Remote,
            Self::IoError(_) => ErrorCategory::Storage,
            Self::CredentialError { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// A malformed answer means the store was reached but the endpoint is
    /// wrong, so it is not worth retrying.
    pub fn severity(&self) -> ErrorSeverity {
        if let Self::MalformedResponseError { .. } = self {
            return ErrorSeverity::Critical;
        }
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ValidationError { path, expected, .. } => {
                format!("Fix the input document so that `{}` is a {}", path, expected)
            }
            Self::SerializationError(_) => {
                "Make sure the input file contains a single well-formed JSON document".to_string()
            }
            Self::CredentialError { .. } => {
                "Set PINATA_API_KEY, PINATA_API_SECRET and QUICKNODE_API_KEY, or fill the [upload] table"
                    .to_string()
            }
            Self::TransportError(_) => {
                "Check network connectivity and the remote store status, then run again".to_string()
            }
            Self::MalformedResponseError { .. } => {
                "Verify the configured upload endpoints point at the expected API".to_string()
            }
            Self::IoError(_) => "Check that the paths exist and are writable".to_string(),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the command line arguments and the TOML configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { path, expected, actual } => format!(
                "The preferences document is invalid: `{}` should be {} but is {}",
                path, expected, actual
            ),
            Self::CredentialError { message } => format!("Upload credentials missing: {}", message),
            Self::TransportError(e) => match e.status() {
                Some(status) => format!("The remote store rejected the upload ({})", status),
                None => "Could not reach the remote store".to_string(),
            },
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RefinerError>;
