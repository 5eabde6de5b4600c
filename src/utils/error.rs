use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Forecast request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Forecast response (HTTP {status}) is not valid JSON: {source}")]
    ParseError {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record encoding error: {message}")]
    EncodeError { message: String },

    #[error("Stream publish failed: {message}")]
    PublishError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Stream,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl RelayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NetworkError(_) => ErrorCategory::Network,
            Self::ParseError { .. } | Self::EncodeError { .. } => ErrorCategory::Data,
            Self::PublishError { .. } => ErrorCategory::Stream,
            Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路與發布錯誤通常可重試
            Self::NetworkError(_) | Self::PublishError { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } | Self::EncodeError { .. } => ErrorSeverity::High,
            Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NetworkError(_) => "Check network connectivity and the forecast API base URL",
            Self::ParseError { .. } => {
                "Verify TOMORROW_API_KEY and that the forecast endpoint returns JSON"
            }
            Self::EncodeError { .. } => "Inspect the forecast payload for unsupported values",
            Self::PublishError { .. } => {
                "Check that the stream exists and the AWS credentials allow kinesis:PutRecord"
            }
            Self::IoError(_) => "Check that the output path exists and is writable",
            Self::InvalidConfigValueError { .. } => {
                "Review the environment variables and command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NetworkError(_) => "Could not reach the weather forecast service".to_string(),
            Self::ParseError { status, .. } => {
                format!("The weather service answered HTTP {} with a non-JSON body", status)
            }
            Self::EncodeError { .. } => "The forecast could not be encoded as a record".to_string(),
            Self::PublishError { .. } => "The forecast record could not be published".to_string(),
            Self::IoError(e) => format!("File system error: {}", e),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_is_data_category() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = RelayError::ParseError { status: 502, source };

        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("502"));
    }

    #[test]
    fn test_publish_error_is_retryable_severity() {
        let err = RelayError::PublishError {
            message: "stream broker not found".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Stream);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("stream broker not found"));
    }
}
