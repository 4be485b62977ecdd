//! Typed reads from a form value

use thiserror::Error;

use crate::model::Value;

/// A typed getter on [`FormValue`](crate::model::FormValue) could not produce
/// the requested shape.
///
/// `Null` and `Undefined` are not errors here; the getters report them as
/// `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("form has no field '{field}'")]
    Missing { field: String },

    /// The field holds a value of another shape. `found` is the value itself,
    /// so callers can show or coerce it.
    #[error("field '{field}' holds {}, expected {expected}", .found.type_name())]
    WrongShape {
        field: String,
        expected: &'static str,
        found: Value,
    },
}

impl FieldError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::Missing {
            field: field.to_string(),
        }
    }

    pub(crate) fn wrong_shape(field: &str, expected: &'static str, found: &Value) -> Self {
        Self::WrongShape {
            field: field.to_string(),
            expected,
            found: found.clone(),
        }
    }

    /// Name of the field the read was for.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::WrongShape { field, .. } => field,
        }
    }
}
