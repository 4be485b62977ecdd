//! Accessor bound to one field of a form snapshot.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::trace;

use super::{FieldAccess, FieldValue};
use crate::model::{FormValue, Touched, Value};
use crate::state::Setter;

/// Read/write handle for one field of a [`FormFields`](super::FormFields)
/// projection.
///
/// Reads answer from the snapshot the projection was built from. Writes go
/// through the form's setters as updaters, so they apply to whatever
/// snapshot is current when they run. A write that leaves the latest value
/// unchanged does not touch the field.
#[derive(Clone)]
pub struct Field {
    name: String,
    value: Value,
    error: Option<String>,
    touched: Arc<Touched>,
    touch_on_change: bool,
    set_value: Setter<FormValue>,
    set_touched: Setter<Touched>,
}

impl Field {
    pub(crate) fn new(
        name: &str,
        value: Value,
        error: Option<String>,
        touched: Arc<Touched>,
        touch_on_change: bool,
        set_value: Setter<FormValue>,
        set_touched: Setter<Touched>,
    ) -> Self {
        Self {
            name: name.to_string(),
            value,
            error,
            touched,
            touch_on_change,
            set_value,
            set_touched,
        }
    }

    /// The field's value in this snapshot.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl FieldAccess for Field {
    type Value = Value;

    fn name(&self) -> &str {
        &self.name
    }

    fn get_value(&self) -> FieldValue<Value> {
        FieldValue::Ready(self.value.clone())
    }

    fn set_value(&self, value: Value) {
        let changed = Arc::new(AtomicBool::new(false));
        let name = self.name.clone();
        let flag = Arc::clone(&changed);
        (self.set_value)(Box::new(move |prev: &Arc<FormValue>| {
            if prev.get(&name) == &value {
                return Arc::clone(prev);
            }
            flag.store(true, Ordering::SeqCst);
            Arc::new(prev.with_field(&name, value))
        }));

        if !changed.load(Ordering::SeqCst) {
            trace!("Field '{}' unchanged, skipping touch", self.name);
            return;
        }
        if self.touch_on_change {
            self.mark_as_touched();
        }
    }

    fn mark_as_touched(&self) {
        let name = self.name.clone();
        (self.set_touched)(Box::new(move |prev: &Arc<Touched>| {
            if prev.contains(&name) {
                Arc::clone(prev)
            } else {
                Arc::new(prev.with(&name))
            }
        }));
    }

    fn is_touched(&self) -> bool {
        self.touched.contains(&self.name)
    }

    fn is_invalid(&self) -> bool {
        self.error.is_some()
    }

    fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("error", &self.error)
            .field("touched", &self.is_touched())
            .finish()
    }
}
