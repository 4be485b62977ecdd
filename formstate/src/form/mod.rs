//! Form state: holds the value, touched list and loading flag, and keeps
//! the field projection and error map in sync with them.

mod config;
mod instance;

pub use config::FormConfig;
pub use instance::Form;
