//! Form validation.
//!
//! Validators are built as an immutable chain of field rules. Each rule sees
//! the field's value and the whole form value, so cross-field checks need no
//! special support. Conditional sub-chains apply only while a predicate over
//! the form value holds.
//!
//! # Example
//!
//! ```
//! use formstate::model::FormValue;
//! use formstate::validation::FormValidator;
//!
//! let validator = FormValidator::new()
//!     .not_blank("username", "Username is required")
//!     .min_length("username", "Username must be at least 3 characters", 3)
//!     .valid_mail("email", "Please enter a valid email")
//!     .when(
//!         |form| form.get("company").as_str().is_some_and(|c| !c.is_empty()),
//!         |v| v.valid_url("website", "Companies need a website"),
//!     );
//!
//! let value = FormValue::new()
//!     .set("username", "al")
//!     .set("email", "al@example.com")
//!     .set("company", "")
//!     .set("website", "");
//!
//! let errors = validator.field_errors(&value);
//! assert_eq!(
//!     errors.message("username"),
//!     Some("Username must be at least 3 characters")
//! );
//! assert!(!errors.contains("website"));
//! ```

mod errors;
mod pattern;
mod rules;
mod validator;

pub use errors::FieldErrors;
pub use pattern::{EMAIL_PATTERN, IntoPattern};
pub use validator::FormValidator;
