//! Dynamic form record

use std::collections::BTreeMap;

use super::Value;
use crate::error::FieldError;

static UNDEFINED: Value = Value::Undefined;

/// The value of a whole form at one instant.
///
/// A `FormValue` maps field names to [`Value`]s. Snapshots are treated as
/// immutable: updating a field produces a new record through
/// [`with_field`](Self::with_field) rather than mutating the one other
/// readers may still hold.
///
/// # Example
///
/// ```
/// use formstate::model::{FormValue, Value};
///
/// let value = FormValue::new()
///     .set("name", "Alice")
///     .set("age", 30);
///
/// assert_eq!(value.get_string("name").unwrap(), Some("Alice"));
/// assert_eq!(value.get("nickname"), &Value::Undefined);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormValue {
    pub(crate) fields: BTreeMap<String, Value>,
}

impl FormValue {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns the field's value, or [`Value::Undefined`] if the key is absent.
    pub fn get(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&UNDEFINED)
    }

    /// Returns `true` if the record has an entry for the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates over the field names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a copy of this record with one field replaced.
    pub fn with_field(&self, field: &str, value: Value) -> Self {
        let mut next = self.clone();
        next.fields.insert(field.to_string(), value);
        next
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if the field is missing or has the wrong type.
    // Return Ok(None) if the field holds Null or Undefined.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null | Value::Undefined) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::wrong_shape(field, "string", other)),
        }
    }

    /// Gets a numeric field value.
    pub fn get_number(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null | Value::Undefined) => Ok(None),
            Some(Value::Number(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::wrong_shape(field, "number", other)),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null | Value::Undefined) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::wrong_shape(field, "bool", other)),
        }
    }

    /// Gets an array field value.
    pub fn get_array(&self, field: &str) -> Result<Option<&[Value]>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null | Value::Undefined) => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.as_slice())),
            Some(other) => Err(FieldError::wrong_shape(field, "array", other)),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FormValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_field_leaves_original_untouched() {
        let original = FormValue::new().set("name", "");
        let next = original.with_field("name", Value::from("Bob"));
        assert_eq!(original.get("name"), &Value::from(""));
        assert_eq!(next.get("name"), &Value::from("Bob"));
    }

    #[test]
    fn test_typed_getters() {
        let value = FormValue::new()
            .set("name", "Ann")
            .set("age", 4)
            .set("nick", Value::Undefined);

        assert_eq!(value.get_string("name").unwrap(), Some("Ann"));
        assert_eq!(value.get_string("nick").unwrap(), None);
        assert_eq!(value.get_number("age").unwrap(), Some(4.0));
        assert!(matches!(
            value.get_number("name"),
            Err(FieldError::WrongShape { .. })
        ));
        assert!(matches!(
            value.get_bool("missing"),
            Err(FieldError::Missing { .. })
        ));
    }
}
