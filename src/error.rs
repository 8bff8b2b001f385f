//! Domain-specific error types for fault-warden

use thiserror::Error;

/// Main error type for the fault-warden core
#[derive(Error, Debug)]
pub enum WardenError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Store read error: {message}")]
    StoreRead { message: String },

    #[error("Store write error: {message}")]
    StoreWrite { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl WardenError {
    /// Store-read failure tagged with the offending path
    pub fn read(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        WardenError::StoreRead {
            message: format!("{}: {}", path.display(), err),
        }
    }

    /// Store-write failure tagged with the offending path
    pub fn write(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        WardenError::StoreWrite {
            message: format!("{}: {}", path.display(), err),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        WardenError::Validation {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for WardenError {
    fn from(err: serde_json::Error) -> Self {
        WardenError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WardenError>;
