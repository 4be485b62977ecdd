//! Shared accessor surface for plain and mapped fields.

use std::future::Future;

use super::{FieldValue, MappedField};
use crate::error::FieldValueError;

/// Read/write handle for one form field, as bound to an input widget.
pub trait FieldAccess {
    /// The value type this accessor presents.
    type Value: Send + 'static;

    /// Name of the underlying form field.
    fn name(&self) -> &str;

    /// Current value of the field.
    fn get_value(&self) -> FieldValue<Self::Value>;

    /// Replace the field's value.
    fn set_value(&self, value: Self::Value);

    /// Mark the field as touched without changing its value.
    fn mark_as_touched(&self);

    /// Whether the user has touched the field since the last reset.
    fn is_touched(&self) -> bool;

    /// Whether the field fails validation.
    fn is_invalid(&self) -> bool;

    fn is_valid(&self) -> bool {
        !self.is_invalid()
    }

    /// Whether an error should be shown: touched and invalid.
    fn is_show_error(&self) -> bool {
        self.is_touched() && self.is_invalid()
    }

    /// Message to display, if any. Rules registered without a message make
    /// the field invalid but return `None` here.
    fn error_message(&self) -> Option<&str>;

    /// Presents the field through a pair of pure conversions.
    ///
    /// `forward` converts the stored value for display, `inverse` converts a
    /// new value back before it is stored. Mapping a mapped field wraps that
    /// mapped field, so conversions compose layer by layer.
    fn map<U, F, G>(&self, forward: F, inverse: G) -> MappedField<Self, U>
    where
        Self: Clone + Sized,
        U: Send + 'static,
        F: Fn(Self::Value) -> U + Send + Sync + 'static,
        G: Fn(U) -> Self::Value + Send + Sync + 'static,
    {
        MappedField::new(
            self.clone(),
            move |value| FieldValue::Ready(forward(value)),
            inverse,
        )
    }

    /// Like [`map`](Self::map), with a forward conversion that completes
    /// later. Reads yield [`FieldValue::Pending`]; writes stay synchronous.
    fn map_async<U, F, Fut, G>(&self, forward: F, inverse: G) -> MappedField<Self, U>
    where
        Self: Clone + Sized,
        U: Send + 'static,
        F: Fn(Self::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<U, FieldValueError>> + Send + 'static,
        G: Fn(U) -> Self::Value + Send + Sync + 'static,
    {
        MappedField::new(
            self.clone(),
            move |value| FieldValue::Pending(Box::pin(forward(value))),
            inverse,
        )
    }
}
