//! Form-level errors

use thiserror::Error;

use super::FieldValidationError;

/// Errors surfaced by form operations.
///
/// Validation itself never fails; these are raised only when a caller asks
/// for something the current form state cannot provide.
#[derive(Debug, Error)]
pub enum FormError {
    /// A valid value was requested while at least one field fails validation.
    #[error("form is invalid: {}", describe(.errors))]
    Invalid { errors: Vec<FieldValidationError> },

    /// The record used to build a form did not serialize to a map.
    #[error("expected a record, got {kind}")]
    NotARecord { kind: &'static str },

    /// Conversion between a typed record and a form value failed.
    #[error("record conversion failed: {0}")]
    Serde(#[from] serde_json::Error),
}

impl FormError {
    /// Names of the failing fields, if this is an `Invalid` error.
    pub fn invalid_fields(&self) -> Vec<&str> {
        match self {
            Self::Invalid { errors } => errors.iter().map(|e| e.field.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn describe(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
