//! Typed form state and validation.
//!
//! A [`Form`](form::Form) tracks the value of a structured record, which of
//! its fields the user has touched, and whether each field passes a
//! [`FormValidator`](validation::FormValidator) chain. UI code binds inputs
//! to [`Field`](field::Field) accessors, optionally through a
//! [`map`](field::FieldAccess::map) conversion.

pub mod error;
pub mod field;
pub mod form;
pub mod model;
pub mod state;
pub mod validation;

pub mod prelude {
    pub use crate::error::{FieldValidationError, FieldValueError, FormError};
    pub use crate::field::{Field, FieldAccess, FieldValue, FormFields, MappedField};
    pub use crate::form::{Form, FormConfig};
    pub use crate::model::{FormValue, Touched, Value};
    pub use crate::state::{Setter, State, Update};
    pub use crate::validation::{FieldErrors, FormValidator};
}
