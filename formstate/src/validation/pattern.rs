//! Pattern and address checks used by the string rules.

use log::warn;
use regex::Regex;
use url::Url;

/// Permissive email shape: something, `@`, something, `.`, something.
///
/// Accepts some addresses a mail server would reject (e.g. `a@b.c`); callers
/// needing strict checks should add their own rule.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Anything usable as the pattern of [`FormValidator::pattern`](super::FormValidator::pattern).
///
/// A source string that fails to compile yields `None`, and the rule built
/// from it rejects every value.
pub trait IntoPattern {
    /// Compiles the pattern.
    fn into_pattern(self) -> Option<Regex>;
}

impl IntoPattern for &str {
    fn into_pattern(self) -> Option<Regex> {
        match Regex::new(self) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Invalid validation pattern {:?}: {}", self, e);
                None
            }
        }
    }
}

impl IntoPattern for String {
    fn into_pattern(self) -> Option<Regex> {
        self.as_str().into_pattern()
    }
}

impl IntoPattern for Regex {
    fn into_pattern(self) -> Option<Regex> {
        Some(self)
    }
}

impl IntoPattern for &Regex {
    fn into_pattern(self) -> Option<Regex> {
        Some(self.clone())
    }
}

/// Returns `true` if `input` parses as an absolute http(s) URL.
pub(crate) fn is_web_url(input: &str) -> bool {
    Url::parse(input)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
