//! Form data model: dynamic values, records and touched lists.

mod record;
mod record_serde;
mod touched;
mod value;

pub use record::FormValue;
pub use touched::Touched;
pub use value::Value;
