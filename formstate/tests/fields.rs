use std::sync::Arc;

use formstate::error::FieldValueError;
use formstate::field::{Field, FieldAccess, FieldValue, FormFields, MappedField};
use formstate::model::{FormValue, Touched, Value};
use formstate::state::State;
use formstate::validation::{FieldErrors, FormValidator};

struct Harness {
    value: State<Arc<FormValue>>,
    touched: State<Arc<Touched>>,
    validator: FormValidator,
}

impl Harness {
    fn new(value: FormValue, validator: FormValidator) -> Self {
        Self {
            value: State::new(Arc::new(value)),
            touched: State::new(Arc::new(Touched::new())),
            validator,
        }
    }

    /// Build a projection from the current snapshots, the way a form does
    /// after every change.
    fn fields(&self) -> FormFields {
        let value = self.value.get();
        let errors = Arc::new(self.validator.field_errors(&value));
        FormFields::new(
            value,
            self.value.setter(),
            self.touched.get(),
            self.touched.setter(),
            errors,
        )
    }

    fn touched_names(&self) -> Vec<String> {
        self.touched.get().iter().map(str::to_string).collect()
    }
}

fn two_fields() -> Harness {
    Harness::new(
        FormValue::new().set("name", "").set("mail", ""),
        FormValidator::new()
            .not_blank("name", "Name is required")
            .valid_mail("mail", "Invalid email"),
    )
}

// ============================================================================
// Field accessor
// ============================================================================

#[test]
fn test_get_value_is_ready() {
    let harness = Harness::new(FormValue::new().set("n", 3), FormValidator::new());
    let fields = harness.fields();
    let n = fields.field("n").unwrap();

    let value = n.get_value();
    assert!(!value.is_pending());
    assert_eq!(value.ready(), Some(Value::from(3)));
    assert_eq!(n.value(), &Value::from(3));
}

#[test]
fn test_set_value_updates_and_touches() {
    let harness = two_fields();
    let fields = harness.fields();

    fields.field("name").unwrap().set_value("Alice".into());
    fields.field("mail").unwrap().set_value("a@b.co".into());
    fields.field("name").unwrap().set_value("Alicia".into());

    assert_eq!(harness.value.get().get("name"), &Value::from("Alicia"));
    assert_eq!(harness.touched_names(), vec!["name", "mail"]);
}

#[test]
fn test_set_value_unchanged_is_noop() {
    let harness = two_fields();
    let before = harness.value.get();
    let fields = harness.fields();

    fields.field("name").unwrap().set_value(Value::from(""));

    assert!(Arc::ptr_eq(&before, &harness.value.get()));
    assert!(harness.touched.get().is_empty());
    assert!(!harness.value.is_dirty());
    assert!(!harness.touched.is_dirty());
}

#[test]
fn test_set_value_keeps_previous_snapshot_intact() {
    let harness = two_fields();
    let before = harness.value.get();
    harness.fields().field("name").unwrap().set_value("Bob".into());

    assert_eq!(before.get("name"), &Value::from(""));
    assert_eq!(harness.value.get().get("name"), &Value::from("Bob"));
}

#[test]
fn test_stale_accessor_writes_apply_to_latest_snapshot() {
    let harness = two_fields();
    let stale = harness.fields();

    harness.fields().field("mail").unwrap().set_value("a@b.co".into());
    stale.field("name").unwrap().set_value("Ann".into());

    let value = harness.value.get();
    assert_eq!(value.get("name"), &Value::from("Ann"));
    assert_eq!(value.get("mail"), &Value::from("a@b.co"));
}

#[test]
fn test_mark_as_touched_is_idempotent() {
    let harness = two_fields();
    harness.fields().field("mail").unwrap().mark_as_touched();
    harness.fields().field("mail").unwrap().mark_as_touched();

    let fields = harness.fields();
    assert_eq!(harness.touched_names(), vec!["mail"]);
    assert!(fields.field("mail").unwrap().is_touched());
    assert!(!fields.field("name").unwrap().is_touched());
}

#[test]
fn test_validity_and_error_display() {
    let harness = two_fields();

    let fields = harness.fields();
    let name = fields.field("name").unwrap();
    assert!(name.is_invalid());
    assert!(!name.is_valid());
    assert!(!name.is_show_error());
    assert_eq!(name.error_message(), Some("Name is required"));

    name.mark_as_touched();
    let fields = harness.fields();
    let name = fields.field("name").unwrap();
    assert!(name.is_show_error());

    name.set_value("Alice".into());
    let fields = harness.fields();
    let name = fields.field("name").unwrap();
    assert!(name.is_valid());
    assert!(!name.is_show_error());
    assert_eq!(name.error_message(), None);
}

#[test]
fn test_silent_error_counts_as_invalid() {
    let harness = Harness::new(
        FormValue::new().set("code", ""),
        FormValidator::new().require_with_no_error("code", |v, _| v.as_str() == Some("ok")),
    );
    let fields = harness.fields();
    let code = fields.field("code").unwrap();

    assert!(code.is_invalid());
    assert_eq!(code.error_message(), None);
}

#[test]
fn test_fields_without_rules_are_valid() {
    let harness = Harness::new(
        FormValue::new().set("free", Value::Undefined),
        FormValidator::new().not_blank("other", "O"),
    );
    let fields = harness.fields();
    assert!(fields.field("free").unwrap().is_valid());
    assert_eq!(fields.iter().count(), 1);
}

#[test]
fn test_projection_exposes_snapshot() {
    let harness = two_fields();
    let fields = harness.fields();
    assert_eq!(fields.value().len(), 2);
    assert!(fields.touched().is_empty());
    assert_eq!(fields.errors().get("name"), Some("Name is required"));
    assert!(FieldErrors::new().is_empty());
}

// ============================================================================
// Mapping
// ============================================================================

fn text_to_number(field: &Field) -> MappedField<Field, String> {
    field.map(
        |v: Value| v.as_f64().map(|n| n.to_string()).unwrap_or_default(),
        |s: String| s.trim().parse::<f64>().map(Value::Number).unwrap_or(Value::Null),
    )
}

#[test]
fn test_map_round_trip() {
    let harness = Harness::new(FormValue::new().set("age", 7), FormValidator::new());

    let fields = harness.fields();
    let age = text_to_number(fields.field("age").unwrap());
    assert_eq!(age.get_value().ready().as_deref(), Some("7"));

    age.set_value("12".to_string());
    assert_eq!(harness.value.get().get("age"), &Value::Number(12.0));

    let fields = harness.fields();
    let age = text_to_number(fields.field("age").unwrap());
    assert_eq!(age.get_value().ready().as_deref(), Some("12"));
    assert!(age.is_touched());
}

#[test]
fn test_map_delegates_status() {
    let harness = Harness::new(
        FormValue::new().set("age", -1),
        FormValidator::new().is_positive("age", "Must be positive"),
    );
    let fields = harness.fields();
    let field = fields.field("age").unwrap();
    let age = text_to_number(field);

    assert_eq!(age.name(), "age");
    assert!(age.is_invalid());
    assert_eq!(age.is_valid(), field.is_valid());
    assert_eq!(age.error_message(), Some("Must be positive"));
    assert!(!age.is_show_error());

    age.mark_as_touched();
    assert_eq!(harness.touched_names(), vec!["age"]);
}

#[test]
fn test_map_of_map_composes_layers() {
    let harness = Harness::new(FormValue::new().set("n", 2), FormValidator::new());
    let fields = harness.fields();

    let doubled = fields.field("n").unwrap().map(
        |v: Value| v.as_f64().unwrap_or(0.0) * 2.0,
        |d: f64| Value::Number(d / 2.0),
    );
    let label = doubled.map(|d: f64| format!("{d}!"), |s: String| {
        s.trim_end_matches('!').parse().unwrap_or(0.0)
    });

    assert_eq!(label.get_value().ready().as_deref(), Some("4!"));
    label.set_value("10!".to_string());
    assert_eq!(harness.value.get().get("n"), &Value::Number(5.0));
    assert_eq!(label.delegate().name(), "n");
}

// ============================================================================
// Pending values
// ============================================================================

#[tokio::test]
async fn test_map_async_is_pending_and_resolves() {
    let harness = Harness::new(FormValue::new().set("id", 3), FormValidator::new());
    let fields = harness.fields();

    let label = fields.field("id").unwrap().map_async(
        |v: Value| async move {
            let id = v.as_f64().ok_or_else(|| FieldValueError::new("no id"))?;
            Ok::<_, FieldValueError>(format!("user-{id}"))
        },
        |_: String| Value::Number(3.0),
    );

    let value = label.get_value();
    assert!(value.is_pending());
    assert_eq!(value.resolve().await.unwrap(), "user-3");
}

#[tokio::test]
async fn test_map_over_pending_composes_continuation() {
    let harness = Harness::new(FormValue::new().set("id", 3), FormValidator::new());
    let fields = harness.fields();

    let fetched = fields.field("id").unwrap().map_async(
        |v: Value| async move { Ok::<_, FieldValueError>(v.as_f64().unwrap_or(0.0) * 10.0) },
        |n: f64| Value::Number(n / 10.0),
    );
    let text = fetched.map(|n: f64| format!("#{n}"), |s: String| {
        s.trim_start_matches('#').parse().unwrap_or(0.0)
    });

    let value = text.get_value();
    assert!(value.is_pending());
    assert_eq!(value.resolve().await.unwrap(), "#30");

    text.set_value("#50".to_string());
    assert_eq!(harness.value.get().get("id"), &Value::Number(5.0));
}

#[tokio::test]
async fn test_pending_failure_propagates() {
    let harness = Harness::new(FormValue::new().set("id", "x"), FormValidator::new());
    let fields = harness.fields();

    let lookup = fields.field("id").unwrap().map_async(
        |v: Value| async move {
            match v.as_f64() {
                Some(n) => Ok(n),
                None => Err(FieldValueError::new("lookup failed")),
            }
        },
        Value::Number,
    );
    let text = lookup.map(|n: f64| n.to_string(), |s: String| s.parse().unwrap_or(0.0));

    let err = text.get_value().resolve().await.unwrap_err();
    assert_eq!(err, FieldValueError::new("lookup failed"));
}

#[test]
fn test_field_value_map_ready() {
    let value: FieldValue<i32> = FieldValue::Ready(2);
    assert_eq!(value.map(|n| n + 1).ready(), Some(3));
}
