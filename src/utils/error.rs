use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input file not found: {path}")]
    FileNotFound { path: String },

    #[error("Input CSV must contain columns: {}", required.join(", "))]
    SchemaError {
        required: Vec<String>,
        missing: Vec<String>,
    },

    #[error("Line {line} has {found} fields, but the header has {expected}")]
    RowLengthError {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Classification error: {message}")]
    ClassificationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Input,
    Configuration,
    System,
    Classification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnnotateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnnotateError::ApiError(_) => ErrorCategory::Network,
            AnnotateError::CsvError(_)
            | AnnotateError::FileNotFound { .. }
            | AnnotateError::SchemaError { .. }
            | AnnotateError::RowLengthError { .. } => ErrorCategory::Input,
            AnnotateError::IoError(_) => ErrorCategory::System,
            AnnotateError::SerializationError(_) | AnnotateError::ClassificationError { .. } => {
                ErrorCategory::Classification
            }
            AnnotateError::ConfigError { .. }
            | AnnotateError::MissingConfigError { .. }
            | AnnotateError::InvalidConfigValueError { .. }
            | AnnotateError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AnnotateError::ApiError(_)
            | AnnotateError::SerializationError(_)
            | AnnotateError::ClassificationError { .. } => ErrorSeverity::Medium,
            AnnotateError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AnnotateError::FileNotFound { path } => format!("Input file not found: {}", path),
            AnnotateError::SchemaError { missing, .. } => {
                format!("Input CSV is missing required columns: {}", missing.join(", "))
            }
            AnnotateError::MissingConfigError { field } => {
                format!("{} is not set", field)
            }
            AnnotateError::CsvError(e) => format!("Could not read the input table: {}", e),
            AnnotateError::ApiError(e) => format!("Request to a remote service failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AnnotateError::FileNotFound { .. } => {
                "Check the path; it is resolved relative to the executable's directory unless --base-dir is given"
            }
            AnnotateError::SchemaError { .. } => {
                "Add the 'ID' and 'Image Src' header columns (names are case-sensitive)"
            }
            AnnotateError::MissingConfigError { .. } => {
                "Set OPENAI_API_KEY in the environment or in a .env file"
            }
            AnnotateError::CsvError(_) => "Make sure the input is UTF-8 encoded CSV",
            AnnotateError::RowLengthError { .. } => {
                "Remove the extra fields or quote values that contain commas"
            }
            AnnotateError::InvalidConfigValueError { .. }
            | AnnotateError::ConfigValidationError { .. }
            | AnnotateError::ConfigError { .. } => "Review the command line flags and settings file",
            AnnotateError::ApiError(_) | AnnotateError::ClassificationError { .. } => {
                "Check network connectivity and the classifier endpoint"
            }
            AnnotateError::IoError(_) => "Check file permissions and free disk space",
            AnnotateError::SerializationError(_) => "The remote service returned unexpected data",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnotateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_errors_exit_with_status_one() {
        let missing_key = AnnotateError::MissingConfigError {
            field: "OPENAI_API_KEY".to_string(),
        };
        let missing_file = AnnotateError::FileNotFound {
            path: "products.csv".to_string(),
        };
        let schema = AnnotateError::SchemaError {
            required: vec!["ID".to_string(), "Image Src".to_string()],
            missing: vec!["ID".to_string()],
        };

        for err in [missing_key, missing_file, schema] {
            assert_eq!(err.severity(), ErrorSeverity::High);
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn test_schema_error_lists_columns() {
        let err = AnnotateError::SchemaError {
            required: vec!["ID".to_string(), "Image Src".to_string()],
            missing: vec!["Image Src".to_string()],
        };

        assert_eq!(err.to_string(), "Input CSV must contain columns: ID, Image Src");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.user_friendly_message().contains("Image Src"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: AnnotateError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.exit_code(), 3);
    }
}
