//! Per-field error map

use std::collections::BTreeMap;

use crate::error::FieldValidationError;

/// Error messages keyed by field name.
///
/// A field without an entry is valid. An entry holding the empty string marks
/// the field invalid without a message to display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    entries: BTreeMap<String, String>,
}

impl FieldErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw entry for a field, including empty messages.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    /// Returns the displayable message for a field.
    ///
    /// Empty messages count as invalid but have nothing to show.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|m| !m.is_empty())
    }

    /// Returns `true` if the field has an entry.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Returns `true` if no field has an error.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of failing fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over `(field, message)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over the failing field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Converts the entries into a list of validation errors.
    pub fn to_validation_errors(&self) -> Vec<FieldValidationError> {
        self.iter()
            .map(|(field, message)| FieldValidationError::new(field, message))
            .collect()
    }

    /// Records an error, keeping an existing entry for the same field.
    pub(crate) fn insert_first(&mut self, field: &str, message: &str) {
        self.entries
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for (field, message) in iter {
            errors
                .entries
                .entry(field.into())
                .or_insert_with(|| message.into());
        }
        errors
    }
}
