//! Field accessors: the per-field projection of a form and value mapping.

mod access;
mod accessor;
mod mapped;
mod projection;
mod value;

pub use access::FieldAccess;
pub use accessor::Field;
pub use mapped::MappedField;
pub use projection::FormFields;
pub use value::FieldValue;
