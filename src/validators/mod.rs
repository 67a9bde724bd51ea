//! Semantic field validators and their evaluation chain.
//!
//! Validators run after a field's type check has passed. A chain is an
//! ordered list of independent checks; evaluation never short-circuits
//! between them, so a caller sees every violated constraint at once.
//! Accumulation uses `Validation` to fold per-check outcomes.

pub mod constraints;

use std::fmt;
use std::sync::Arc;

use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::trace;

use crate::core::{resolve, ValidatedRecord, Value};
use crate::engine::ValidationConfig;
use crate::error::ValidationError;

type SimplePredicate = Arc<dyn for<'v> Fn(&Value<'v>) -> bool + Send + Sync>;
type DependPredicate = Arc<dyn for<'v> Fn(&Value<'v>, &Value<'v>) -> bool + Send + Sync>;

/// A check over the field value alone.
#[derive(Clone)]
pub struct SimpleValidator {
    predicate: SimplePredicate,
    message: String,
    skip_none: bool,
}

impl SimpleValidator {
    pub fn new<F>(predicate: F, message: impl Into<String>, skip_none: bool) -> Self
    where
        F: for<'v> Fn(&Value<'v>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
            skip_none,
        }
    }

    pub fn check_value(
        &self,
        value: &Value<'_>,
        config: &ValidationConfig,
    ) -> Option<ValidationError> {
        if self.skip_none && matches!(value, Value::None) {
            return None;
        }
        if (self.predicate)(value) {
            return None;
        }
        Some(
            ValidationError::constraint(format!("Expect {}", self.message))
                .with_note(format!("value {}", config.format_value(value))),
        )
    }
}

/// A check over the field value plus another attribute of the record,
/// resolved by dotted path against the record instance.
#[derive(Clone)]
pub struct DependValidator {
    path: String,
    predicate: DependPredicate,
    message: String,
    skip_none: bool,
}

impl DependValidator {
    pub fn new<F>(
        path: impl Into<String>,
        predicate: F,
        message: impl Into<String>,
        skip_none: bool,
    ) -> Self
    where
        F: for<'v> Fn(&Value<'v>, &Value<'v>) -> bool + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            predicate: Arc::new(predicate),
            message: message.into(),
            skip_none,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// An unresolvable path is a schema bug, not a data violation: it
    /// panics instead of being collected.
    pub fn check_value(
        &self,
        value: &Value<'_>,
        instance: &dyn ValidatedRecord,
        config: &ValidationConfig,
    ) -> Option<ValidationError> {
        if self.skip_none && matches!(value, Value::None) {
            return None;
        }
        let expected = match resolve(Value::Record(instance), &self.path) {
            Ok(expected) => expected,
            Err(error) => panic!("validator path `{}` does not resolve: {error}", self.path),
        };
        if (self.predicate)(value, &expected) {
            return None;
        }
        Some(
            ValidationError::constraint(format!(
                "Expect {} with field {}",
                self.message, self.path
            ))
            .with_note(format!("value {}", config.format_value(value)))
            .with_note(format!("expected value {}", config.format_value(&expected))),
        )
    }
}

/// A validator attached to a field.
#[derive(Clone)]
pub enum FieldValidator {
    Simple(SimpleValidator),
    Depend(DependValidator),
}

impl FieldValidator {
    pub fn check_value(
        &self,
        value: &Value<'_>,
        instance: &dyn ValidatedRecord,
        config: &ValidationConfig,
    ) -> Option<ValidationError> {
        match self {
            FieldValidator::Simple(validator) => validator.check_value(value, config),
            FieldValidator::Depend(validator) => validator.check_value(value, instance, config),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FieldValidator::Simple(validator) => &validator.message,
            FieldValidator::Depend(validator) => &validator.message,
        }
    }
}

impl fmt::Display for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValidator::Simple(validator) => write!(f, "validate {}", validator.message),
            FieldValidator::Depend(validator) => {
                write!(f, "validate {} with {}", validator.message, validator.path)
            }
        }
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValidator::Simple(validator) => write!(f, "<validator:{}>", validator.message),
            FieldValidator::Depend(validator) => {
                write!(f, "<validator:{}:{}>", validator.message, validator.path)
            }
        }
    }
}

/// One attachable constraint unit, wrapping exactly one validator.
#[derive(Clone)]
pub struct Constraint(FieldValidator);

impl Constraint {
    /// A constraint over the field value alone.
    pub fn simple<F>(predicate: F, message: impl Into<String>, skip_none: bool) -> Self
    where
        F: for<'v> Fn(&Value<'v>) -> bool + Send + Sync + 'static,
    {
        Constraint(FieldValidator::Simple(SimpleValidator::new(
            predicate, message, skip_none,
        )))
    }

    /// A constraint comparing the field value against another attribute.
    pub fn depend<F>(
        path: impl Into<String>,
        predicate: F,
        message: impl Into<String>,
        skip_none: bool,
    ) -> Self
    where
        F: for<'v> Fn(&Value<'v>, &Value<'v>) -> bool + Send + Sync + 'static,
    {
        Constraint(FieldValidator::Depend(DependValidator::new(
            path, predicate, message, skip_none,
        )))
    }

    pub fn validator(&self) -> &FieldValidator {
        &self.0
    }

    pub(crate) fn into_validator(self) -> FieldValidator {
        self.0
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Run every validator in the chain, accumulating ALL failures.
/// Returns `Validation::Success(())` if every check passes.
pub fn enforce(
    validators: &[FieldValidator],
    value: &Value<'_>,
    instance: &dyn ValidatedRecord,
    config: &ValidationConfig,
) -> Validation<(), NonEmptyVec<ValidationError>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<ValidationError>>> = Vec::new();

    for validator in validators {
        trace!(validator = %validator, "run validator");
        let check = match validator.check_value(value, instance, config) {
            None => Validation::success(()),
            Some(error) => Validation::fail(error),
        };
        checks.push(check);
    }

    // Accumulate ALL failures using all_vec
    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{field, FieldDef, TypeSpec};

    #[derive(Debug)]
    struct Pair {
        left: Value<'static>,
        right: Value<'static>,
        fields: Vec<FieldDef>,
    }

    impl Pair {
        fn new(left: Value<'static>, right: Value<'static>) -> Self {
            Self {
                left,
                right,
                fields: vec![
                    field("left", TypeSpec::Any).build(),
                    field("right", TypeSpec::Any).build(),
                ],
            }
        }
    }

    impl ValidatedRecord for Pair {
        fn class_name(&self) -> &'static str {
            "Pair"
        }

        fn fields(&self) -> &[FieldDef] {
            &self.fields
        }

        fn field_value(&self, name: &str) -> Option<Value<'_>> {
            match name {
                "left" => Some(self.left.clone()),
                "right" => Some(self.right.clone()),
                _ => None,
            }
        }
    }

    fn config() -> ValidationConfig {
        ValidationConfig::default()
    }

    #[test]
    fn simple_validator_reports_value() {
        let validator = SimpleValidator::new(
            |v: &Value<'_>| matches!(v.partial_cmp(&Value::Int(3)), Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)),
            "min value 3",
            true,
        );
        assert!(validator.check_value(&Value::Int(5), &config()).is_none());

        let error = validator.check_value(&Value::Int(1), &config()).unwrap();
        assert_eq!(error.message(), "Expect min value 3");
        assert_eq!(error.notes(), ["value 1"]);
    }

    #[test]
    fn skip_none_passes_unconditionally() {
        let validator = SimpleValidator::new(|_: &Value<'_>| false, "never", true);
        assert!(validator.check_value(&Value::None, &config()).is_none());

        let strict = SimpleValidator::new(|_: &Value<'_>| false, "never", false);
        assert!(strict.check_value(&Value::None, &config()).is_some());
    }

    #[test]
    fn depend_validator_resolves_the_other_field() {
        let record = Pair::new(Value::from("aa"), Value::from("aa"));
        let validator =
            DependValidator::new("right", |a: &Value<'_>, b: &Value<'_>| a == b, "equal", true);
        let value = record.field_value("left").unwrap();
        assert!(validator.check_value(&value, &record, &config()).is_none());

        let record = Pair::new(Value::from("aa"), Value::from("ab"));
        let value = record.field_value("left").unwrap();
        let error = validator.check_value(&value, &record, &config()).unwrap();
        assert_eq!(error.message(), "Expect equal with field right");
        assert_eq!(error.notes(), ["value \"aa\"", "expected value \"ab\""]);
    }

    #[test]
    #[should_panic(expected = "does not resolve")]
    fn depend_validator_with_bad_path_panics() {
        let record = Pair::new(Value::Int(1), Value::Int(1));
        let validator =
            DependValidator::new("missing", |a: &Value<'_>, b: &Value<'_>| a == b, "equal", true);
        let value = record.field_value("left").unwrap();
        let _ = validator.check_value(&value, &record, &config());
    }

    #[test]
    fn enforce_accumulates_all_violations() {
        let record = Pair::new(Value::Int(0), Value::Int(9));
        let chain = vec![
            constraints::min(1).into_validator(),
            constraints::max(-1).into_validator(),
            constraints::equals_field("right").into_validator(),
        ];
        let value = record.field_value("left").unwrap();

        let result = enforce(&chain, &value, &record, &config());
        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn enforce_succeeds_when_all_checks_pass() {
        let record = Pair::new(Value::Int(5), Value::Int(5));
        let chain = vec![
            constraints::min(1).into_validator(),
            constraints::equals_field("right").into_validator(),
        ];
        let value = record.field_value("left").unwrap();
        assert!(enforce(&chain, &value, &record, &config()).is_success());
    }

    #[test]
    fn display_and_debug_mirror_the_chain() {
        let simple = constraints::min(10);
        assert_eq!(simple.to_string(), "validate min value 10");
        assert_eq!(format!("{simple:?}"), "<validator:min value 10>");

        let depend = constraints::equals_field("b");
        assert_eq!(depend.to_string(), "validate equal with b");
        assert_eq!(format!("{depend:?}"), "<validator:equal:b>");
    }
}
