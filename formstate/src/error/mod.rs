//! Error types

mod field;
mod form;
mod validation;
mod value;

pub use field::*;
pub use form::*;
pub use validation::*;
pub use value::*;
