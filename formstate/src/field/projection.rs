//! Per-field projection of a form snapshot.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use super::Field;
use crate::model::{FormValue, Touched};
use crate::state::Setter;
use crate::validation::FieldErrors;

/// One accessor per form field, built lazily from a single snapshot.
///
/// Field names are taken from the form value when the projection is
/// created. Each [`Field`] is created the first time it is requested and
/// reused for the lifetime of the projection; a new snapshot needs a new
/// projection.
pub struct FormFields {
    value: Arc<FormValue>,
    set_value: Setter<FormValue>,
    touched: Arc<Touched>,
    set_touched: Setter<Touched>,
    errors: Arc<FieldErrors>,
    touch_on_change: bool,
    fields: BTreeMap<String, OnceLock<Field>>,
}

impl FormFields {
    /// Creates a projection over the given snapshot and sinks.
    pub fn new(
        value: Arc<FormValue>,
        set_value: Setter<FormValue>,
        touched: Arc<Touched>,
        set_touched: Setter<Touched>,
        errors: Arc<FieldErrors>,
    ) -> Self {
        let fields = value
            .keys()
            .map(|name| (name.to_string(), OnceLock::new()))
            .collect();
        Self {
            value,
            set_value,
            touched,
            set_touched,
            errors,
            touch_on_change: true,
            fields,
        }
    }

    /// Whether writing a changed value marks the field as touched.
    /// Defaults to `true`.
    pub fn touch_on_change(mut self, enabled: bool) -> Self {
        self.touch_on_change = enabled;
        for slot in self.fields.values_mut() {
            *slot = OnceLock::new();
        }
        self
    }

    /// Returns the accessor for `name`, or `None` if the form value has no
    /// such field.
    pub fn field(&self, name: &str) -> Option<&Field> {
        let slot = self.fields.get(name)?;
        Some(slot.get_or_init(|| self.build(name)))
    }

    /// Iterates over all accessors, creating any not yet requested.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .map(|(name, slot)| slot.get_or_init(|| self.build(name)))
    }

    /// Field names covered by this projection.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The snapshot this projection reads from.
    pub fn value(&self) -> &Arc<FormValue> {
        &self.value
    }

    /// The touched list this projection reads from.
    pub fn touched(&self) -> &Arc<Touched> {
        &self.touched
    }

    /// The error map this projection reads from.
    pub fn errors(&self) -> &Arc<FieldErrors> {
        &self.errors
    }

    fn build(&self, name: &str) -> Field {
        Field::new(
            name,
            self.value.get(name).clone(),
            self.errors.get(name).map(str::to_string),
            Arc::clone(&self.touched),
            self.touch_on_change,
            Arc::clone(&self.set_value),
            Arc::clone(&self.set_touched),
        )
    }
}

impl fmt::Debug for FormFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormFields")
            .field("value", &self.value)
            .field("touched", &self.touched)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldAccess;
    use crate::model::Value;
    use crate::state::State;

    fn projection(value: FormValue) -> (State<Arc<FormValue>>, State<Arc<Touched>>, FormFields) {
        let value = State::new(Arc::new(value));
        let touched = State::new(Arc::new(Touched::new()));
        let fields = FormFields::new(
            value.get(),
            value.setter(),
            touched.get(),
            touched.setter(),
            Arc::new(FieldErrors::new()),
        );
        (value, touched, fields)
    }

    #[test]
    fn test_accessors_are_memoized() {
        let (_, _, fields) = projection(FormValue::new().set("name", "a"));
        let first = fields.field("name").unwrap() as *const Field;
        let second = fields.field("name").unwrap() as *const Field;
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_field() {
        let (_, _, fields) = projection(FormValue::new().set("name", "a"));
        assert!(fields.field("other").is_none());
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_touch_on_change_disabled() {
        let (value, touched, fields) = projection(FormValue::new().set("name", "a"));
        let fields = fields.touch_on_change(false);
        fields.field("name").unwrap().set_value("b".into());
        assert_eq!(value.get().get("name"), &Value::from("b"));
        assert!(touched.get().is_empty());
    }
}
