//! Field accessor presenting a converted value type.

use std::fmt;
use std::sync::Arc;

use super::{FieldAccess, FieldValue};

type Forward<T, U> = Arc<dyn Fn(T) -> FieldValue<U> + Send + Sync>;
type Inverse<U, T> = Arc<dyn Fn(U) -> T + Send + Sync>;

/// A field accessor that converts values on the way in and out.
///
/// Touched state, validity and messages come straight from the wrapped
/// accessor. Created with [`FieldAccess::map`] or
/// [`FieldAccess::map_async`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use formstate::field::{FieldAccess, FormFields};
/// use formstate::model::{FormValue, Touched, Value};
/// use formstate::state::State;
/// use formstate::validation::FieldErrors;
///
/// let value = State::new(Arc::new(FormValue::new().set("age", 41)));
/// let touched = State::new(Arc::new(Touched::new()));
/// let fields = FormFields::new(
///     value.get(),
///     value.setter(),
///     touched.get(),
///     touched.setter(),
///     Arc::new(FieldErrors::new()),
/// );
///
/// // Bind a text input to a numeric field.
/// let age = fields.field("age").unwrap().map(
///     |v: Value| v.as_f64().map(|n| n.to_string()).unwrap_or_default(),
///     |s: String| s.parse::<f64>().map(Value::Number).unwrap_or(Value::Null),
/// );
///
/// assert_eq!(age.get_value().ready().as_deref(), Some("41"));
/// age.set_value("42".to_string());
/// assert_eq!(value.get().get("age"), &Value::Number(42.0));
/// ```
pub struct MappedField<D: FieldAccess, U> {
    delegate: D,
    forward: Forward<D::Value, U>,
    inverse: Inverse<U, D::Value>,
}

impl<D: FieldAccess, U: Send + 'static> MappedField<D, U> {
    pub(crate) fn new<F, G>(delegate: D, forward: F, inverse: G) -> Self
    where
        F: Fn(D::Value) -> FieldValue<U> + Send + Sync + 'static,
        G: Fn(U) -> D::Value + Send + Sync + 'static,
    {
        Self {
            delegate,
            forward: Arc::new(forward),
            inverse: Arc::new(inverse),
        }
    }

    /// The accessor this one wraps.
    pub fn delegate(&self) -> &D {
        &self.delegate
    }
}

impl<D: FieldAccess, U: Send + 'static> FieldAccess for MappedField<D, U> {
    type Value = U;

    fn name(&self) -> &str {
        self.delegate.name()
    }

    fn get_value(&self) -> FieldValue<U> {
        let forward = Arc::clone(&self.forward);
        self.delegate.get_value().and_then(move |value| forward(value))
    }

    fn set_value(&self, value: U) {
        self.delegate.set_value((self.inverse)(value));
    }

    fn mark_as_touched(&self) {
        self.delegate.mark_as_touched();
    }

    fn is_touched(&self) -> bool {
        self.delegate.is_touched()
    }

    fn is_invalid(&self) -> bool {
        self.delegate.is_invalid()
    }

    fn is_valid(&self) -> bool {
        self.delegate.is_valid()
    }

    fn is_show_error(&self) -> bool {
        self.delegate.is_show_error()
    }

    fn error_message(&self) -> Option<&str> {
        self.delegate.error_message()
    }
}

impl<D: FieldAccess + Clone, U> Clone for MappedField<D, U> {
    fn clone(&self) -> Self {
        Self {
            delegate: self.delegate.clone(),
            forward: Arc::clone(&self.forward),
            inverse: Arc::clone(&self.inverse),
        }
    }
}

impl<D: FieldAccess + fmt::Debug, U> fmt::Debug for MappedField<D, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedField")
            .field("delegate", &self.delegate)
            .finish_non_exhaustive()
    }
}
