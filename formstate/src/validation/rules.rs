//! Built-in field rules.
//!
//! Every rule treats a value of the wrong shape as invalid, and every rule
//! except [`not_undefined`](FormValidator::not_undefined) rejects
//! `Undefined`. String lengths are counted in characters.

use super::FormValidator;
use super::pattern::{EMAIL_PATTERN, IntoPattern, is_web_url};
use crate::model::{FormValue, Value};

impl FormValidator {
    // =========================================================================
    // Typed building blocks
    // =========================================================================

    /// Adds a rule over string values. Non-strings fail.
    pub fn append_string_validator<F>(
        &self,
        field: impl Into<String>,
        message: impl Into<String>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&str, &FormValue) -> bool + Send + Sync + 'static,
    {
        self.append_rule(field, message, move |v, form| match v {
            Value::String(s) => predicate(s.as_str(), form),
            _ => false,
        })
    }

    /// Adds a rule over numeric values. Non-numbers fail.
    pub fn append_number_validator<F>(
        &self,
        field: impl Into<String>,
        message: impl Into<String>,
        predicate: F,
    ) -> Self
    where
        F: Fn(f64, &FormValue) -> bool + Send + Sync + 'static,
    {
        self.append_rule(field, message, move |v, form| match v {
            Value::Number(n) => predicate(*n, form),
            _ => false,
        })
    }

    // =========================================================================
    // Presence
    // =========================================================================

    /// Requires the field to hold any value, `Null` included.
    pub fn not_undefined(&self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.append_rule(field, message, |v, _| !v.is_undefined())
    }

    /// Requires a string with at least one non-whitespace character.
    pub fn not_blank(&self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.append_string_validator(field, message, |s, _| !s.trim().is_empty())
    }

    /// Requires the field to differ from `other`.
    pub fn not_equals(
        &self,
        field: impl Into<String>,
        message: impl Into<String>,
        other: impl Into<Value>,
    ) -> Self {
        let other = other.into();
        self.require(field, message, move |v, _| v != &other)
    }

    /// Requires a non-empty array.
    pub fn not_empty(&self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.append_rule(field, message, |v, _| {
            v.as_array().is_some_and(|items| !items.is_empty())
        })
    }

    // =========================================================================
    // String length
    // =========================================================================

    /// Requires a string of at least `min` characters.
    pub fn min_length(
        &self,
        field: impl Into<String>,
        message: impl Into<String>,
        min: usize,
    ) -> Self {
        self.append_string_validator(field, message, move |s, _| s.chars().count() >= min)
    }

    /// Requires a string of at most `max` characters.
    pub fn max_length(
        &self,
        field: impl Into<String>,
        message: impl Into<String>,
        max: usize,
    ) -> Self {
        self.append_string_validator(field, message, move |s, _| s.chars().count() <= max)
    }

    /// Requires a string of exactly `len` characters.
    pub fn has_length(
        &self,
        field: impl Into<String>,
        message: impl Into<String>,
        len: usize,
    ) -> Self {
        self.append_string_validator(field, message, move |s, _| s.chars().count() == len)
    }

    // =========================================================================
    // String format
    // =========================================================================

    /// Requires a string containing a match for `pattern`.
    ///
    /// Anchor the pattern (`^...$`) to match the whole value.
    pub fn pattern(
        &self,
        field: impl Into<String>,
        message: impl Into<String>,
        pattern: impl IntoPattern,
    ) -> Self {
        let re = pattern.into_pattern();
        self.append_string_validator(field, message, move |s, _| {
            re.as_ref().is_some_and(|re| re.is_match(s))
        })
    }

    /// Requires an email-shaped string (see [`EMAIL_PATTERN`]).
    pub fn valid_mail(&self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.pattern(field, message, EMAIL_PATTERN)
    }

    /// Requires an absolute `http` or `https` URL.
    pub fn valid_url(&self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.append_string_validator(field, message, |s, _| is_web_url(s))
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// Requires a number greater than zero.
    pub fn is_positive(&self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.append_number_validator(field, message, |n, _| n > 0.0)
    }

    /// Requires a number greater than `bound`.
    pub fn greater_than(
        &self,
        field: impl Into<String>,
        message: impl Into<String>,
        bound: f64,
    ) -> Self {
        self.append_number_validator(field, message, move |n, _| n > bound)
    }

    /// Requires a whole number.
    pub fn is_integer(&self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.append_number_validator(field, message, |n, _| n.is_finite() && n.fract() == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(field: &str, value: impl Into<Value>) -> FormValue {
        FormValue::new().set(field, value)
    }

    #[test]
    fn test_not_undefined_accepts_null() {
        let v = FormValidator::new().not_undefined("a", "E");
        assert!(v.is_valid(&form("a", Value::Null)));
        assert!(!v.is_valid(&form("a", Value::Undefined)));
        assert!(!v.is_valid(&FormValue::new()));
    }

    #[test]
    fn test_not_equals() {
        let v = FormValidator::new().not_equals("choice", "Pick one", "none");
        assert!(!v.is_valid(&form("choice", "none")));
        assert!(v.is_valid(&form("choice", "red")));
        assert!(!v.is_valid(&form("choice", Value::Undefined)));
    }

    #[test]
    fn test_length_rules_count_chars() {
        let v = FormValidator::new().has_length("code", "E", 3);
        assert!(v.is_valid(&form("code", "äöü")));
        assert!(!v.is_valid(&form("code", "ab")));

        let v = FormValidator::new().max_length("code", "E", 2);
        assert!(v.is_valid(&form("code", "ab")));
        assert!(!v.is_valid(&form("code", "abc")));
        assert!(!v.is_valid(&form("code", 12)));
    }

    #[test]
    fn test_pattern_with_regex_and_bad_source() {
        let re = regex::Regex::new(r"^\d{4}$").unwrap();
        let v = FormValidator::new().pattern("pin", "E", re);
        assert!(v.is_valid(&form("pin", "1234")));
        assert!(!v.is_valid(&form("pin", "12a4")));

        let broken = FormValidator::new().pattern("pin", "E", "(");
        assert!(!broken.is_valid(&form("pin", "(")));
    }

    #[test]
    fn test_numeric_rules() {
        let v = FormValidator::new()
            .is_positive("n", "positive")
            .is_integer("n", "integer")
            .greater_than("m", "big", 10.0);

        let errors = v.field_errors(&FormValue::new().set("n", 1.5).set("m", 10));
        assert_eq!(errors.get("n"), Some("integer"));
        assert_eq!(errors.get("m"), Some("big"));

        let errors = v.field_errors(&FormValue::new().set("n", "3").set("m", 11));
        assert_eq!(errors.get("n"), Some("positive"));
        assert!(!errors.contains("m"));
    }

    #[test]
    fn test_not_empty_merges_wrong_type_and_empty() {
        let v = FormValidator::new().not_empty("tags", "E");
        assert!(v.is_valid(&form("tags", vec!["x"])));
        assert!(!v.is_valid(&form("tags", Vec::<String>::new())));
        assert!(!v.is_valid(&form("tags", "x")));
        assert!(!v.is_valid(&FormValue::new()));
    }
}
