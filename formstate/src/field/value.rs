//! Field values that may still be resolving.

use std::fmt;

use futures::TryFutureExt;
use futures::future::BoxFuture;

use crate::error::FieldValueError;

/// The value read from a field accessor.
///
/// Plain fields are always `Ready`. A value becomes `Pending` once an
/// asynchronous mapping is applied; mapping a pending value composes a
/// continuation and never polls the underlying future.
pub enum FieldValue<T> {
    /// The value is available now.
    Ready(T),
    /// The value resolves later, or fails with the underlying error.
    Pending(BoxFuture<'static, Result<T, FieldValueError>>),
}

impl<T: Send + 'static> FieldValue<T> {
    /// Returns `true` if the value has not resolved yet.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns the value if it is ready.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending(_) => None,
        }
    }

    /// Applies `f` now, or once the pending value resolves.
    pub fn map<U, F>(self, f: F) -> FieldValue<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        match self {
            Self::Ready(value) => FieldValue::Ready(f(value)),
            Self::Pending(fut) => FieldValue::Pending(Box::pin(fut.map_ok(f))),
        }
    }

    /// Chains a transform that may itself be pending.
    pub fn and_then<U, F>(self, f: F) -> FieldValue<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> FieldValue<U> + Send + 'static,
    {
        match self {
            Self::Ready(value) => f(value),
            Self::Pending(fut) => {
                FieldValue::Pending(Box::pin(fut.and_then(move |value| f(value).resolve())))
            }
        }
    }

    /// Waits for the value.
    pub async fn resolve(self) -> Result<T, FieldValueError> {
        match self {
            Self::Ready(value) => Ok(value),
            Self::Pending(fut) => fut.await,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FieldValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Self::Pending(_) => f.write_str("Pending"),
        }
    }
}

impl<T> From<T> for FieldValue<T> {
    fn from(value: T) -> Self {
        Self::Ready(value)
    }
}
