//! Touched field list

/// Ordered list of fields the user has interacted with.
///
/// Names are unique and keep their first-touched order. The list only grows
/// until the form is reset; every change produces a new list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Touched {
    fields: Vec<String>,
}

impl Touched {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the field has been touched.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Returns a list with `field` appended, or an unchanged copy if it is
    /// already present.
    pub fn with(&self, field: &str) -> Self {
        let mut next = self.clone();
        if !next.contains(field) {
            next.fields.push(field.to_string());
        }
        next
    }

    /// Returns a list with every name from `fields` appended in order,
    /// skipping names already present.
    pub fn union<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Self {
        let mut next = self.clone();
        for field in fields {
            if !next.contains(field) {
                next.fields.push(field.to_string());
            }
        }
        next
    }

    /// Iterates over the touched field names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Returns the number of touched fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if nothing has been touched.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Touched {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut touched = Touched::new();
        for field in iter {
            let field = field.into();
            if !touched.contains(&field) {
                touched.fields.push(field);
            }
        }
        touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_is_idempotent() {
        let touched = Touched::new().with("a").with("b").with("a");
        assert_eq!(touched.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_union_preserves_order() {
        let touched = Touched::from_iter(["b"]).union(["a", "b", "c"]);
        assert_eq!(touched.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }
}
