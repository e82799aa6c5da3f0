use thiserror::Error;

/// Pipeline stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Load,
    Data,
    Write,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Config => "configuration",
            Stage::Load => "load",
            Stage::Data => "data",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Data,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Cannot read input file '{path}': {source}")]
    SourceReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse '{path}' as {format}: {message}")]
    SourceFormatError {
        path: String,
        format: String,
        message: String,
    },

    #[error("Sheet '{sheet}' not found in '{path}'")]
    SheetNotFoundError { path: String, sheet: String },

    #[error("Required column '{column}' not found in '{path}' (available: {available})")]
    MissingColumnError {
        path: String,
        column: String,
        available: String,
    },

    #[error("Row {line} has no value for column '{column}'")]
    MissingValueError { line: usize, column: String },

    #[error("Cannot write output file '{path}': {source}")]
    OutputWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl EtlError {
    pub fn stage(&self) -> Stage {
        match self {
            EtlError::SourceReadError { .. }
            | EtlError::SourceFormatError { .. }
            | EtlError::SheetNotFoundError { .. }
            | EtlError::MissingColumnError { .. } => Stage::Load,
            EtlError::MissingValueError { .. } => Stage::Data,
            EtlError::OutputWriteError { .. } | EtlError::SerializationError(_) => Stage::Write,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => Stage::Config,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.stage() {
            Stage::Config => ErrorCategory::Configuration,
            Stage::Load => ErrorCategory::Input,
            Stage::Data => ErrorCategory::Data,
            Stage::Write => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::MissingValueError { .. } => ErrorSeverity::Medium,
            EtlError::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.stage() {
            Stage::Config => 2,
            Stage::Load => 3,
            Stage::Data => 4,
            Stage::Write => 5,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::SourceReadError { path, .. } => {
                format!("Check that '{}' exists and is readable", path)
            }
            EtlError::SourceFormatError { .. } => {
                "Save the input as .xlsx or .csv and make sure it is not corrupted".to_string()
            }
            EtlError::SheetNotFoundError { .. } => {
                "Omit --sheet to use the first sheet, or pass an existing sheet name".to_string()
            }
            EtlError::MissingColumnError { column, .. } => format!(
                "Add a '{}' header to the first row, or pass the actual column name",
                column
            ),
            EtlError::MissingValueError { .. } => {
                "Fill the empty cell, or run with --missing skip to ignore incomplete rows"
                    .to_string()
            }
            EtlError::OutputWriteError { .. } => {
                "Check that the output directory exists and is writable".to_string()
            }
            EtlError::SerializationError(_) => "This is a bug, please report it".to_string(),
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Review the command-line flags and the configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        format!("{} stage failed: {}", self.stage(), self)
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
