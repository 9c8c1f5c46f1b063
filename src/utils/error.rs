use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Error parsing number {input}: {source}")]
    Parse {
        input: String,
        #[source]
        source: phonenumber::ParseError,
    },

    #[error("Invalid number: {input}")]
    InvalidNumber { input: String },

    #[error("Error processing number {number}: {message}")]
    Lookup { number: String, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Metadata error in {source_name} line {line}: {reason}")]
    Metadata {
        source_name: String,
        line: u64,
        reason: String,
    },
}

impl AppError {
    /// 使用者輸入造成的錯誤，處理方式一律為記錄、顯示、略過
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::Parse { .. } | AppError::InvalidNumber { .. } | AppError::Lookup { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::Parse { .. } | AppError::InvalidNumber { .. } => {
                "Enter the number with its country code, e.g. +91xxxxxxxxxx"
            }
            AppError::Lookup { .. } => "Check the metadata files in the configured data directory",
            AppError::FileNotFound { .. } => "Check that the path exists and is readable",
            AppError::IoError(_) => "Check file permissions and available disk space",
            AppError::CsvError(_) | AppError::Metadata { .. } => {
                "Fix the offending metadata row or remove the override file"
            }
            AppError::ConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
