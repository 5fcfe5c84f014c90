use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unable to parse date '{value}' with any supported format")]
    DateParseError { value: String },

    #[error("Malformed record: {message}")]
    RecordError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Parsing,
    Configuration,
    Output,
    Processing,
}

impl AnalyzerError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Single bad rows are skipped upstream; if one surfaces here
            // the run can still be considered mostly fine.
            AnalyzerError::DateParseError { .. } | AnalyzerError::RecordError { .. } => {
                ErrorSeverity::Low
            }
            AnalyzerError::CsvError(_) | AnalyzerError::ProcessingError { .. } => {
                ErrorSeverity::Medium
            }
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::ConfigValidationError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::MissingConfigError { .. }
            | AnalyzerError::SerializationError(_) => ErrorSeverity::High,
            // Unreadable input is fatal per the skip-and-continue policy.
            AnalyzerError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyzerError::IoError(_) => ErrorCategory::Io,
            AnalyzerError::CsvError(_)
            | AnalyzerError::DateParseError { .. }
            | AnalyzerError::RecordError { .. } => ErrorCategory::Parsing,
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::ConfigValidationError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AnalyzerError::SerializationError(_) => ErrorCategory::Output,
            AnalyzerError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AnalyzerError::IoError(_) => {
                "Check that the input file exists and is readable".to_string()
            }
            AnalyzerError::CsvError(_) => {
                "Check the CSV structure: EmpID, ProjectID, DateFrom, DateTo".to_string()
            }
            AnalyzerError::DateParseError { .. } => {
                "Use one of the supported date formats: YYYY-MM-DD, M/D/YYYY or DD/MM/YYYY"
                    .to_string()
            }
            AnalyzerError::RecordError { .. } => {
                "Each row needs four fields: EmpID, ProjectID, DateFrom, DateTo".to_string()
            }
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::ConfigValidationError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::MissingConfigError { .. } => {
                "Review the configuration values (run with --help for options)".to_string()
            }
            AnalyzerError::SerializationError(_) => {
                "Report rendering failed; re-run with --verbose for details".to_string()
            }
            AnalyzerError::ProcessingError { .. } => {
                "Re-run with --verbose to see which stage failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AnalyzerError::IoError(e) => format!("Could not read or write a file: {}", e),
            AnalyzerError::CsvError(e) => format!("The input CSV could not be processed: {}", e),
            AnalyzerError::DateParseError { value } => {
                format!("'{}' is not a recognized date", value)
            }
            AnalyzerError::RecordError { message } => format!("A row was malformed: {}", message),
            AnalyzerError::ConfigError { message } => format!("Configuration problem: {}", message),
            AnalyzerError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            AnalyzerError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not valid for '{}': {}", value, field, reason)
            }
            AnalyzerError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            AnalyzerError::SerializationError(e) => {
                format!("Could not render the report: {}", e)
            }
            AnalyzerError::ProcessingError { message } => {
                format!("Analysis failed: {}", message)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
