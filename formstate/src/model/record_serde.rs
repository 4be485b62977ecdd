//! Serialization for FormValue and the bridge to typed records.
//!
//! A form is usually described by a plain struct. `from_record` flattens it
//! into a [`FormValue`] and `into_record` reads a (possibly narrower) struct
//! back out, which is how a validated form yields its typed value.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::DeserializeOwned;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::FormValue;
use super::Value;
use crate::error::FormError;

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for FormValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.fields {
            // Undefined means "no entry"
            if !value.is_undefined() {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for FormValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FormValueVisitor)
    }
}

struct FormValueVisitor;

impl<'de> Visitor<'de> for FormValueVisitor {
    type Value = FormValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of form fields")
    }

    fn visit_map<M>(self, mut map: M) -> Result<FormValue, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut fields = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            fields.insert(key, value);
        }
        Ok(FormValue { fields })
    }
}

// =============================================================================
// Typed records
// =============================================================================

impl FormValue {
    /// Builds a form value from any serializable record.
    ///
    /// The record must serialize to a map (a struct or a map type).
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, FormError> {
        match serde_json::to_value(record)? {
            serde_json::Value::Object(map) => Ok(FormValue {
                fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            }),
            other => Err(FormError::NotARecord {
                kind: Value::from(other).type_name(),
            }),
        }
    }

    /// Reads the form value back into a typed record.
    ///
    /// The target type may be stricter than the one the form was built
    /// from, e.g. `String` where the form type has `Option<String>`.
    pub fn into_record<T: DeserializeOwned>(&self) -> Result<T, FormError> {
        let json = serde_json::to_value(self)?;
        Ok(serde_json::from_value(json)?)
    }
}
