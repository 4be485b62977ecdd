//! Form state orchestration.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, trace};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::FormConfig;
use crate::error::FormError;
use crate::field::{Field, FormFields};
use crate::model::{FormValue, Touched};
use crate::state::State;
use crate::validation::{FieldErrors, FormValidator};

/// Values derived from one (value, touched, validator) combination.
struct Derived {
    value: Arc<FormValue>,
    touched: Arc<Touched>,
    validator: FormValidator,
    fields: Arc<FormFields>,
}

/// The state of one form.
///
/// `Form` owns the current value, the touched list and a loading flag, and
/// derives the error map and field accessors from them. Derived values are
/// rebuilt only after the value, the touched list or the validator changed.
///
/// # Example
///
/// ```
/// use formstate::field::FieldAccess;
/// use formstate::form::Form;
/// use formstate::model::FormValue;
/// use formstate::validation::FormValidator;
///
/// let form = Form::new(
///     FormValue::new().set("name", "").set("mail", ""),
///     FormValidator::new()
///         .not_blank("name", "Name is required")
///         .valid_mail("mail", "Invalid email"),
/// );
///
/// let name = form.field("name").unwrap();
/// assert!(name.is_invalid());
/// assert!(!name.is_show_error());
///
/// name.set_value("Alice".into());
/// assert!(form.field("name").unwrap().is_valid());
/// assert!(form.is_invalid());
///
/// form.reset();
/// assert!(form.touched().is_empty());
/// ```
pub struct Form {
    config: FormConfig,
    initial: State<Arc<FormValue>>,
    value: State<Arc<FormValue>>,
    touched: State<Arc<Touched>>,
    loading: State<bool>,
    validator: State<FormValidator>,
    derived: RwLock<Option<Derived>>,
}

impl Form {
    /// Create a form with the default configuration.
    pub fn new(initial: FormValue, validator: FormValidator) -> Self {
        Self::with_config(initial, validator, FormConfig::default())
    }

    /// Create a form with the given configuration.
    pub fn with_config(initial: FormValue, validator: FormValidator, config: FormConfig) -> Self {
        let initial = Arc::new(initial);
        let touched: Touched = config.touched.iter().map(String::as_str).collect();
        Self {
            initial: State::new(Arc::clone(&initial)),
            value: State::new(initial),
            touched: State::new(Arc::new(touched)),
            loading: State::new(config.loading),
            validator: State::new(validator),
            derived: RwLock::new(None),
            config,
        }
    }

    /// Create a form whose initial value is a serializable record.
    pub fn from_record<T: Serialize>(
        record: &T,
        validator: FormValidator,
    ) -> Result<Self, FormError> {
        Ok(Self::new(FormValue::from_record(record)?, validator))
    }

    /// The form's configuration.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// The current value.
    pub fn value(&self) -> Arc<FormValue> {
        self.value.get()
    }

    /// The value the form resets to.
    pub fn initial(&self) -> Arc<FormValue> {
        self.initial.get()
    }

    /// The current touched list.
    pub fn touched(&self) -> Arc<Touched> {
        self.touched.get()
    }

    /// The active validator.
    pub fn validator(&self) -> FormValidator {
        self.validator.get()
    }

    /// Replace the whole value. Touched fields are left as they are.
    pub fn set_value(&self, value: FormValue) {
        self.value.set(Arc::new(value));
    }

    /// Swap the validator, e.g. when the rules depend on outside settings.
    pub fn set_validator(&self, validator: FormValidator) {
        debug!("[{}] Validator replaced", self.config.name);
        self.validator.set(validator);
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Field accessors for the current snapshot.
    ///
    /// Returns the cached projection unless the value, touched list or
    /// validator changed since it was built.
    pub fn fields(&self) -> Arc<FormFields> {
        if !self.value.is_dirty() && !self.touched.is_dirty() && !self.validator.is_dirty() {
            let derived = self.derived.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(derived) = derived.as_ref() {
                return Arc::clone(&derived.fields);
            }
        }

        // Clear before reading so a write racing with the rebuild marks the
        // state dirty again.
        self.value.clear_dirty();
        self.touched.clear_dirty();
        self.validator.clear_dirty();

        let value = self.value.get();
        let touched = self.touched.get();
        let validator = self.validator.get();

        let mut derived = self.derived.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = derived.as_ref() {
            if Arc::ptr_eq(&current.value, &value)
                && Arc::ptr_eq(&current.touched, &touched)
                && current.validator.same_chain(&validator)
            {
                trace!("[{}] Snapshot unchanged, reusing fields", self.config.name);
                return Arc::clone(&current.fields);
            }
        }

        let errors = Arc::new(validator.field_errors(&value));
        debug!(
            "[{}] Recomputed fields: {} field(s), {} error(s), {} touched",
            self.config.name,
            value.len(),
            errors.len(),
            touched.len()
        );

        let fields = Arc::new(
            FormFields::new(
                Arc::clone(&value),
                self.value.setter(),
                Arc::clone(&touched),
                self.touched.setter(),
                errors,
            )
            .touch_on_change(self.config.touch_on_change),
        );

        *derived = Some(Derived {
            value,
            touched,
            validator,
            fields: Arc::clone(&fields),
        });
        fields
    }

    /// Accessor for one field of the current snapshot.
    pub fn field(&self, name: &str) -> Option<Field> {
        self.fields().field(name).cloned()
    }

    /// Error map for the current value.
    pub fn errors(&self) -> Arc<FieldErrors> {
        Arc::clone(self.fields().errors())
    }

    /// Whether any field fails validation.
    pub fn is_invalid(&self) -> bool {
        !self.errors().is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.is_invalid()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    /// Run a future with the loading flag raised.
    ///
    /// The flag drops back to `false` when the future completes or is
    /// dropped.
    pub async fn run_loading<F: Future>(&self, fut: F) -> F::Output {
        let _guard = LoadingGuard::raise(&self.loading);
        fut.await
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Restore the initial value and clear the touched list.
    pub fn reset(&self) {
        debug!("[{}] Reset", self.config.name);
        self.value.set(self.initial.get());
        self.touched.set(Arc::new(Touched::new()));
    }

    /// Make `value` the new initial value and reset to it.
    pub fn reset_to(&self, value: FormValue) {
        self.initial.set(Arc::new(value));
        self.reset();
    }

    /// Mark every validated field as touched, e.g. on a submit attempt so
    /// all errors become visible.
    pub fn touch_all_validated_fields(&self) {
        let fields = self.validator.get().validated_fields();
        debug!(
            "[{}] Touching {} validated field(s)",
            self.config.name,
            fields.len()
        );
        self.touched.apply(Box::new(move |prev: &Arc<Touched>| {
            let next = prev.union(fields.iter().map(String::as_str));
            if next.len() == prev.len() {
                Arc::clone(prev)
            } else {
                Arc::new(next)
            }
        }));
    }

    /// The current value, provided every field is valid.
    pub fn valid_value(&self) -> Result<Arc<FormValue>, FormError> {
        let fields = self.fields();
        let errors = fields.errors();
        if errors.is_empty() {
            Ok(Arc::clone(fields.value()))
        } else {
            Err(FormError::Invalid {
                errors: errors.to_validation_errors(),
            })
        }
    }

    /// The current value as a typed record, provided every field is valid.
    ///
    /// `T` can be narrower than the record the form was built from, since
    /// the validator guarantees the fields it checks.
    pub fn valid_record<T: DeserializeOwned>(&self) -> Result<T, FormError> {
        self.valid_value()?.into_record()
    }
}

/// Keeps the loading flag raised while alive.
struct LoadingGuard<'a> {
    loading: &'a State<bool>,
}

impl<'a> LoadingGuard<'a> {
    fn raise(loading: &'a State<bool>) -> Self {
        loading.set(true);
        Self { loading }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.set(false);
    }
}
