use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoliceApiError {
    /// Upstream answered with anything other than 200.
    #[error("GET {path} {status}")]
    Api { path: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV rendering error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing field '{field}' in response from {path}")]
    MissingField { path: String, field: String },

    #[error("Unexpected response shape from {path}: expected {expected}")]
    UnexpectedShape { path: String, expected: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PoliceApiError {
    pub fn api(path: impl Into<String>, status: u16) -> Self {
        Self::Api {
            path: path.into(),
            status,
        }
    }

    pub fn missing_field(path: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            path: path.into(),
            field: field.into(),
        }
    }

    pub fn unexpected_shape(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            path: path.into(),
            expected: expected.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Api { .. } => ErrorCategory::Upstream,
            Self::Http(_) => ErrorCategory::Network,
            Self::Serialization(_)
            | Self::Csv(_)
            | Self::MissingField { .. }
            | Self::UnexpectedShape { .. } => ErrorCategory::Data,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 5xx 與網路錯誤通常稍後重跑即可
            Self::Api { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            Self::Http(_) => ErrorSeverity::Medium,
            Self::Api { .. }
            | Self::Serialization(_)
            | Self::Csv(_)
            | Self::MissingField { .. }
            | Self::UnexpectedShape { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::Io(_) => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::Api { status: 404, path } => {
                format!("Check that the base URL is correct and that {} exists", path)
            }
            Self::Api { status, .. } if *status >= 500 => {
                "The police data API is having trouble, try again later".to_string()
            }
            Self::Api { .. } => "Check the request headers and base URL".to_string(),
            Self::Http(_) => {
                "Check your network connection or raise --timeout-seconds".to_string()
            }
            Self::Serialization(_) | Self::MissingField { .. } | Self::UnexpectedShape { .. } => {
                "The API response format may have changed; rerun with --verbose".to_string()
            }
            Self::Csv(_) => "Try another --output-format".to_string(),
            Self::Io(_) => "Check file permissions and available disk space".to_string(),
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting and run again", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Api { path, status } => {
                format!("API Error: GET {} returned status {}", path, status)
            }
            Self::Http(e) if e.is_timeout() => "The police data API timed out".to_string(),
            Self::Http(_) => "Could not reach the police data API".to_string(),
            Self::MissingField { path, field } => {
                format!("Response from {} has no '{}' field", path, field)
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            _ => self.to_string(),
        }
    }

    /// One log line for a failed run, whatever stage it failed in.
    pub fn summary(&self) -> String {
        format!(
            "Search failed: {} (Category: {:?}, Severity: {:?})",
            self,
            self.category(),
            self.severity()
        )
    }
}

pub type Result<T> = std::result::Result<T, PoliceApiError>;
