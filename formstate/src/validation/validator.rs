//! Persistent validator chain.

use std::fmt;
use std::sync::Arc;

use super::FieldErrors;
use crate::error::FormError;
use crate::model::{FormValue, Value};

/// Rule predicate: `(field value, whole form value) -> valid`.
type RulePredicate = Arc<dyn Fn(&Value, &FormValue) -> bool + Send + Sync>;

/// Gate for a conditional sub-chain.
type Guard = Arc<dyn Fn(&FormValue) -> bool + Send + Sync>;

/// One link of the chain. Nodes never change after construction; appending
/// wraps the existing chain as the new node's parent.
enum Node {
    Root,
    Rule {
        field: String,
        message: String,
        predicate: RulePredicate,
        parent: Arc<Node>,
    },
    When {
        guard: Guard,
        nested: Arc<Node>,
        parent: Arc<Node>,
    },
}

impl Node {
    fn is_field_valid(&self, field: &str, value: &FormValue) -> bool {
        match self {
            Node::Root => true,
            Node::Rule {
                field: own,
                predicate,
                parent,
                ..
            } => {
                if !parent.is_field_valid(field, value) {
                    return false;
                }
                if own != field {
                    return true;
                }
                predicate(value.get(field), value)
            }
            Node::When {
                guard,
                nested,
                parent,
            } => {
                if !parent.is_field_valid(field, value) {
                    return false;
                }
                if guard(value) {
                    nested.is_field_valid(field, value)
                } else {
                    true
                }
            }
        }
    }

    fn collect_fields(&self, out: &mut Vec<String>) {
        match self {
            Node::Root => {}
            Node::Rule { field, parent, .. } => {
                parent.collect_fields(out);
                if !out.contains(field) {
                    out.push(field.clone());
                }
            }
            Node::When { nested, parent, .. } => {
                parent.collect_fields(out);
                nested.collect_fields(out);
            }
        }
    }

    fn validated_fields(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn field_errors(&self, value: &FormValue) -> FieldErrors {
        match self {
            Node::Root => FieldErrors::new(),
            Node::Rule {
                field,
                message,
                predicate,
                parent,
            } => {
                let mut errors = parent.field_errors(value);
                if errors.contains(field) {
                    return errors;
                }
                if !predicate(value.get(field), value) {
                    errors.insert_first(field, message);
                }
                errors
            }
            Node::When {
                guard,
                nested,
                parent,
            } => {
                let mut errors = parent.field_errors(value);
                let covered = nested
                    .validated_fields()
                    .iter()
                    .all(|field| errors.contains(field));
                if covered || !guard(value) {
                    return errors;
                }
                for (field, message) in nested.field_errors(value).iter() {
                    errors.insert_first(field, message);
                }
                errors
            }
        }
    }
}

/// An immutable chain of field rules.
///
/// Every builder method returns a new validator that wraps the current one,
/// so a validator can be shared and extended freely; the receiver keeps
/// validating exactly what it validated before.
///
/// When several rules target the same field, the first one appended that
/// fails decides the field's message.
///
/// # Example
///
/// ```
/// use formstate::model::FormValue;
/// use formstate::validation::FormValidator;
///
/// let validator = FormValidator::new()
///     .not_blank("name", "Name is required")
///     .min_length("name", "Name is too short", 3)
///     .valid_mail("mail", "Please enter a valid email");
///
/// let value = FormValue::new().set("name", "Al").set("mail", "al@example.com");
/// let errors = validator.field_errors(&value);
///
/// assert_eq!(errors.message("name"), Some("Name is too short"));
/// assert!(!errors.contains("mail"));
/// ```
#[derive(Clone)]
pub struct FormValidator {
    node: Arc<Node>,
}

impl FormValidator {
    /// Creates a validator that accepts every form value.
    pub fn new() -> Self {
        Self {
            node: Arc::new(Node::Root),
        }
    }

    /// Returns `true` if `value[field]` satisfies every rule targeting
    /// `field`, evaluated against the whole form value.
    pub fn is_field_valid(&self, field: &str, value: &FormValue) -> bool {
        self.node.is_field_valid(field, value)
    }

    /// Returns every field targeted by at least one rule, in the order the
    /// fields were first added.
    pub fn validated_fields(&self) -> Vec<String> {
        self.node.validated_fields()
    }

    /// Computes the error map for a form value.
    pub fn field_errors(&self, value: &FormValue) -> FieldErrors {
        self.node.field_errors(value)
    }

    /// Returns `true` if no field reports an error.
    pub fn is_valid(&self, value: &FormValue) -> bool {
        self.field_errors(value).is_empty()
    }

    /// Checks a form value, returning the failing fields as an error.
    pub fn validate(&self, value: &FormValue) -> Result<(), FormError> {
        let errors = self.field_errors(value);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid {
                errors: errors.to_validation_errors(),
            })
        }
    }

    /// Adds a custom rule. Undefined field values always fail.
    pub fn require<F>(
        &self,
        field: impl Into<String>,
        message: impl Into<String>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&Value, &FormValue) -> bool + Send + Sync + 'static,
    {
        self.append_rule(field, message, move |v, form| {
            !v.is_undefined() && predicate(v, form)
        })
    }

    /// Adds a custom rule that marks the field invalid without a message.
    pub fn require_with_no_error<F>(&self, field: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &FormValue) -> bool + Send + Sync + 'static,
    {
        self.require(field, "", predicate)
    }

    /// Adds a sub-chain that only applies while `guard` holds on the form
    /// value.
    ///
    /// ```
    /// use formstate::model::FormValue;
    /// use formstate::validation::FormValidator;
    ///
    /// let validator = FormValidator::new().when(
    ///     |form| form.get("subscribe").as_bool() == Some(true),
    ///     |v| v.valid_mail("mail", "Email needed for the newsletter"),
    /// );
    ///
    /// let off = FormValue::new().set("subscribe", false).set("mail", "");
    /// assert!(validator.is_valid(&off));
    ///
    /// let on = FormValue::new().set("subscribe", true).set("mail", "");
    /// assert!(!validator.is_valid(&on));
    /// ```
    pub fn when<G, B>(&self, guard: G, build: B) -> Self
    where
        G: Fn(&FormValue) -> bool + Send + Sync + 'static,
        B: FnOnce(FormValidator) -> FormValidator,
    {
        let nested = build(FormValidator::new());
        Self {
            node: Arc::new(Node::When {
                guard: Arc::new(guard),
                nested: nested.node,
                parent: Arc::clone(&self.node),
            }),
        }
    }

    /// Returns `true` if both handles point at the same chain.
    pub(crate) fn same_chain(&self, other: &FormValidator) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Wraps the chain with a rule whose predicate sees every value,
    /// including `Undefined`.
    pub(crate) fn append_rule<F>(
        &self,
        field: impl Into<String>,
        message: impl Into<String>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&Value, &FormValue) -> bool + Send + Sync + 'static,
    {
        Self {
            node: Arc::new(Node::Rule {
                field: field.into(),
                message: message.into(),
                predicate: Arc::new(predicate),
                parent: Arc::clone(&self.node),
            }),
        }
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidator")
            .field("validated_fields", &self.validated_fields())
            .finish()
    }
}
