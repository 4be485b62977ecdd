//! Errors produced by pending field values

use thiserror::Error;

/// A pending field value that failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldValueError {
    /// Error message
    pub message: String,
}

impl FieldValueError {
    /// Create a new field value error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for FieldValueError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for FieldValueError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
