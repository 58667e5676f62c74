use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoxError {
    #[error("Key '{key}' not found in item at index {index}")]
    KeyNotFound { key: String, index: usize },

    #[error("Item with index {index} has no '{key}' primary key value")]
    MissingPrimaryKey { key: String, index: usize },

    #[error("Cannot compute {operation} of an empty input")]
    EmptyInput { operation: String },

    #[error("Not enough arguments to serialize the key")]
    EmptyArguments,

    #[error("Unknown sanitize mode: {mode}")]
    UnknownSanitizeMode { mode: String },

    #[error("Invalid cookie lifetime: {lifetime}")]
    InvalidLifetime { lifetime: i64 },

    #[error("Invalid cookie name: '{name}'")]
    InvalidCookieName { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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
    /// Caller handed in data of the wrong shape.
    Input,
    Config,
    System,
}

impl BoxError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BoxError::KeyNotFound { .. }
            | BoxError::MissingPrimaryKey { .. }
            | BoxError::EmptyInput { .. }
            | BoxError::EmptyArguments
            | BoxError::UnknownSanitizeMode { .. }
            | BoxError::InvalidLifetime { .. }
            | BoxError::InvalidCookieName { .. } => ErrorCategory::Input,
            BoxError::ConfigValidationError { .. } | BoxError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            BoxError::IoError(_) | BoxError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BoxError::KeyNotFound { key, .. } => {
                format!("Make sure every item carries the '{}' field", key)
            }
            BoxError::MissingPrimaryKey { key, .. } => {
                format!("Fill in '{}' for every item or disable strict mode", key)
            }
            BoxError::EmptyInput { .. } | BoxError::EmptyArguments => {
                "Pass at least one value".to_string()
            }
            BoxError::UnknownSanitizeMode { .. } => {
                "Use one of: user, safeString, integer, alphanum, url, mobile, boolean".to_string()
            }
            BoxError::InvalidLifetime { .. } => {
                "Use a positive lifetime, 0 for a session cookie or a negative value to delete"
                    .to_string()
            }
            BoxError::InvalidCookieName { .. } => {
                "Cookie names must be non-empty and contain no separators or whitespace".to_string()
            }
            BoxError::ConfigValidationError { .. } | BoxError::InvalidConfigValueError { .. } => {
                "Check the configuration file".to_string()
            }
            BoxError::IoError(_) => "Check that the file exists and is readable".to_string(),
            BoxError::SerializationError(_) => "Check that the input is valid JSON".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BoxError>;
