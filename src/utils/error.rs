use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Row {row}: cannot convert {column} value '{value}' to {target}")]
    CoercionError {
        row: u64,
        column: String,
        value: String,
        target: &'static str,
    },

    #[error("Failed to write output to {path}: {source}")]
    WriteError {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InputAccess,
    Schema,
    Coercion,
    OutputAccess,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::InputNotFound { .. } => ErrorCategory::InputAccess,
            EtlError::CsvError(_) | EtlError::MissingColumn { .. } => ErrorCategory::Schema,
            EtlError::CoercionError { .. } => ErrorCategory::Coercion,
            EtlError::WriteError { .. } => ErrorCategory::OutputAccess,
            EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::InputAccess
            | ErrorCategory::OutputAccess
            | ErrorCategory::Schema
            | ErrorCategory::Coercion => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::InputNotFound { path } => {
                format!("Check that '{}' exists and is readable", path)
            }
            EtlError::MissingColumn { column } => format!(
                "Add a '{}' column to the CSV header, or point --input at a file that has one",
                column
            ),
            EtlError::CoercionError { row, column, .. } => format!(
                "Fix the {} value on data row {} so it parses as a number",
                column, row
            ),
            EtlError::WriteError { path, .. } => format!(
                "Check that the directory of '{}' exists and is writable",
                path
            ),
            EtlError::InvalidConfigValueError { field, .. } => {
                format!("Correct the '{}' argument and retry", field)
            }
            EtlError::CsvError(_) => "Check the input file for malformed CSV rows".to_string(),
            _ => "Check logs for details and retry".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::InputNotFound { path } => format!("Cannot read input file '{}'", path),
            EtlError::MissingColumn { column } => {
                format!("The input CSV has no '{}' column", column)
            }
            EtlError::CoercionError {
                row,
                column,
                value,
                target,
            } => format!(
                "Data row {} has a bad {} value: '{}' is not a valid {}",
                row, column, value, target
            ),
            EtlError::WriteError { path, .. } => format!("Cannot write output file '{}'", path),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
