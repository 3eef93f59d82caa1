use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid value for {field} ({value}): {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Upstream API reported status {status}")]
    UpstreamStatus { status: String },

    #[error("Unexpected upstream payload: {message}")]
    UnexpectedPayload { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    Config { field: String, message: String },

    #[error("Request lifecycle error: {message}")]
    Lifecycle { message: String },
}

/// 錯誤分類，呼叫端依此決定是否重試
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Upstream,
    Io,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn lifecycle(message: impl Into<String>) -> Self {
        AppError::Lifecycle {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Validation { .. } => ErrorCategory::Validation,
            AppError::Transport(_)
            | AppError::HttpStatus { .. }
            | AppError::UpstreamStatus { .. }
            | AppError::UnexpectedPayload { .. }
            | AppError::Serialization(_) => ErrorCategory::Upstream,
            AppError::Io(_) => ErrorCategory::Io,
            AppError::Config { .. } => ErrorCategory::Configuration,
            AppError::Lifecycle { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Io | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// Upstream 的暫時性錯誤可以重試，驗證錯誤重試也不會成功
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            AppError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    pub fn is_upstream(&self) -> bool {
        self.category() == ErrorCategory::Upstream
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AppError::Validation { field, .. } => {
                format!("Check the value passed for '{}' and try again", field)
            }
            AppError::Transport(_) => {
                "Check your network connection; the request can be retried".to_string()
            }
            AppError::HttpStatus { status, .. } if *status >= 500 || *status == 429 => {
                "The upstream service is unavailable right now; retry later".to_string()
            }
            AppError::HttpStatus { .. } => "Verify the requested resource exists".to_string(),
            AppError::UpstreamStatus { .. } => {
                "The API rejected the request parameters; verify coordinates and date".to_string()
            }
            AppError::UnexpectedPayload { .. } | AppError::Serialization(_) => {
                "The API response format may have changed; check the configured base URL"
                    .to_string()
            }
            AppError::Io(_) => "Check file permissions and that the path is reachable".to_string(),
            AppError::Config { field, .. } => {
                format!("Fix '{}' in the configuration file or CLI flags", field)
            }
            AppError::Lifecycle { .. } => "This is a bug; please report it".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Validation { field, reason, .. } => {
                format!("Invalid input for {}: {}", field, reason)
            }
            AppError::Transport(_) => "Could not reach the remote service".to_string(),
            AppError::HttpStatus { status, .. } => {
                format!("The remote service answered with HTTP {}", status)
            }
            AppError::UpstreamStatus { status } => {
                format!("The remote service could not process the request ({})", status)
            }
            AppError::UnexpectedPayload { .. } | AppError::Serialization(_) => {
                "The remote service returned data in an unexpected format".to_string()
            }
            AppError::Io(e) => format!("File system error: {}", e),
            AppError::Config { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            AppError::Lifecycle { message } => format!("Internal error: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_not_retryable() {
        let err = AppError::validation("latitude", 120.0, "out of range");
        assert!(err.is_validation());
        assert!(!err.is_retryable());
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_http_status_retry_rules() {
        let server_error = AppError::HttpStatus {
            status: 503,
            url: "http://x/".to_string(),
        };
        let not_found = AppError::HttpStatus {
            status: 404,
            url: "http://x/".to_string(),
        };
        assert!(server_error.is_upstream());
        assert!(server_error.is_retryable());
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_api_status_is_upstream() {
        let err = AppError::UpstreamStatus {
            status: "INVALID_REQUEST".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert!(err.user_friendly_message().contains("INVALID_REQUEST"));
    }
}
