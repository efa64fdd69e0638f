use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Data source error: {message}")]
    DataSource { message: String },

    #[error("Data source request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("No location found for country code '{country_code}'")]
    NotFound { country_code: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

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
    DataSource,
    NotFound,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashError {
    pub fn data_source(message: impl Into<String>) -> Self {
        DashError::DataSource {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::DataSource { .. } | DashError::Request(_) => ErrorCategory::DataSource,
            DashError::NotFound { .. } => ErrorCategory::NotFound,
            DashError::ConfigError { .. }
            | DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DashError::ZipError(_)
            | DashError::CsvError(_)
            | DashError::IoError(_)
            | DashError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    /// Both the explicit variant and transport failures count as a data source error.
    pub fn is_data_source_error(&self) -> bool {
        self.category() == ErrorCategory::DataSource
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::DataSource => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashError::NotFound { country_code } => {
                format!("No data found for country code '{}'", country_code)
            }
            DashError::Request(e) if e.is_timeout() => {
                "The statistics service did not answer in time".to_string()
            }
            DashError::Request(e) if e.is_connect() => {
                "Could not connect to the statistics service".to_string()
            }
            DashError::Request(e) if e.is_status() => match e.status() {
                Some(status) => format!("The statistics service rejected the request ({})", status),
                None => "The statistics service rejected the request".to_string(),
            },
            DashError::Request(_) => "The statistics service returned an unreadable answer".to_string(),
            DashError::DataSource { message } => {
                format!("The statistics service returned unusable data: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::DataSource => "Check --api-endpoint and --data-source, then try again",
            ErrorCategory::NotFound => {
                "Use a two-letter ISO 3166-1 alpha-2 country code such as US, FR or IT"
            }
            ErrorCategory::Configuration => "Fix the configuration value named above",
            ErrorCategory::Output => "Check that the output path exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
