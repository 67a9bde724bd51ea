//! Record validation orchestration.
//!
//! The orchestrator walks every declared field of a record instance: type
//! check first, then the validator chain, then recursion into nested
//! validated records (directly, through map entries, and through collection
//! elements). Every failure across the whole record is collected and
//! returned as one structured error; validation never stops at the first
//! violation.

mod config;

pub use config::{ValidationConfig, ValueFormatter};

use stillwater::validation::Validation;
use tracing::debug;

use crate::core::{ValidatedRecord, Value};
use crate::error::{ErrorCollector, ValidationError};
use crate::schema::{check_type_with, FieldDef};
use crate::validators::enforce;

/// The validation engine.
///
/// Stateless apart from its diagnostic configuration; one instance can
/// validate any number of records from any number of threads.
///
/// # Example
///
/// ```rust
/// use std::sync::OnceLock;
///
/// use fieldset::schema::{field, Class, FieldDef, TypeSpec};
/// use fieldset::validators::constraints;
/// use fieldset::{RecordValidator, ValidatedRecord, Value};
///
/// #[derive(Debug)]
/// struct Ticket {
///     code: String,
/// }
///
/// static FIELDS: OnceLock<Vec<FieldDef>> = OnceLock::new();
///
/// impl ValidatedRecord for Ticket {
///     fn class_name(&self) -> &'static str {
///         "Ticket"
///     }
///
///     fn fields(&self) -> &[FieldDef] {
///         FIELDS.get_or_init(|| {
///             vec![field("code", TypeSpec::Scalar(Class::Str))
///                 .constrain(constraints::regex("[A-Z]{3}-[0-9]+"))
///                 .build()]
///         })
///     }
///
///     fn field_value(&self, name: &str) -> Option<Value<'_>> {
///         match name {
///             "code" => Some(Value::from(self.code.as_str())),
///             _ => None,
///         }
///     }
/// }
///
/// let validator = RecordValidator::new();
/// assert!(validator.full_validate(&Ticket { code: "ABC-12".into() }).is_ok());
///
/// let error = validator
///     .full_validate(&Ticket { code: "abc".into() })
///     .unwrap_err();
/// assert_eq!(error.message(), "Expect regular expression `[A-Z]{3}-[0-9]+`");
/// assert_eq!(error.notes(), ["value \"abc\"", "field code"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordValidator {
    config: ValidationConfig,
}

impl RecordValidator {
    /// Engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with explicit diagnostic configuration.
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Run the full validation of a record instance.
    ///
    /// Walks every declared field in declaration order, then the record's
    /// custom [`validate`](ValidatedRecord::validate) hook. Returns `Ok(())`
    /// when nothing failed; a single failure is returned as-is; several
    /// failures come wrapped in one group captioned `Validation errors`,
    /// each annotated `field <name>`.
    ///
    /// Repeated calls on unchanged state return identical errors. Recursion
    /// depth is bounded by the nesting of the record graph; cyclic graphs
    /// are not detected and recurse without bound.
    pub fn full_validate(&self, record: &dyn ValidatedRecord) -> Result<(), ValidationError> {
        debug!(record = record.class_name(), "validate record");

        let mut collector = ErrorCollector::new();
        for field in record.fields() {
            let error = self
                .validate_field(record, field)
                .map(|error| error.with_note(format!("field {}", field.name())));
            collector.add(error);
        }

        collector.scoped(&[], || {
            debug!(record = record.class_name(), "run custom validator");
            record.validate()
        });

        debug!(
            record = record.class_name(),
            errors = collector.len(),
            "validation finished"
        );

        match collector.single_or_group("Validation errors") {
            Some(error) => {
                if self.config.log_error_tree() {
                    debug!("validation error tree:\n{error}");
                }
                Err(error)
            }
            None => Ok(()),
        }
    }

    /// Validate one declared field of a record instance.
    ///
    /// The type check gates everything else: a value of the wrong shape is
    /// reported alone, with semantic validators skipped. Otherwise every
    /// attached validator runs, and nested validated records found in the
    /// value (directly, as map entry values, or as collection elements) are
    /// fully validated with `key <k>` / `index <i>` context notes.
    pub fn validate_field(
        &self,
        record: &dyn ValidatedRecord,
        field: &FieldDef,
    ) -> Option<ValidationError> {
        let value = record.field_value(field.name()).unwrap_or_else(|| {
            panic!(
                "record {} produced no value for declared field {}",
                record.class_name(),
                field.name()
            )
        });
        debug!(field = field.name(), "validate field");

        if let Some(error) = check_type_with(&value, field.spec(), &self.config) {
            debug!(field = field.name(), "type validation failed, return error");
            return Some(error);
        }

        let mut collector = ErrorCollector::new();
        if let Validation::Failure(errors) = enforce(field.validators(), &value, record, &self.config)
        {
            collector.extend(errors.iter().cloned().map(Some));
        }

        match &value {
            Value::Record(nested) => {
                // the nested record speaks for itself, no extra note
                collector.scoped(&[], || self.full_validate(*nested));
            }
            Value::Map(entries) => {
                for (key, entry) in entries {
                    if let Value::Record(nested) = entry {
                        collector.scoped(&[format!("key {key}")], || self.full_validate(*nested));
                    }
                }
            }
            Value::List(items) | Value::Set(items) | Value::Tuple(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Value::Record(nested) = item {
                        collector
                            .scoped(&[format!("index {index}")], || self.full_validate(*nested));
                    }
                }
            }
            _ => {}
        }

        collector.single_or_group("Field validation errors")
    }
}

/// Run full validation with the default configuration.
///
/// The single public entry point for hosts that do not need a configured
/// engine.
pub fn full_validate(record: &dyn ValidatedRecord) -> Result<(), ValidationError> {
    RecordValidator::new().full_validate(record)
}

/// Human-readable summary of every validator attached to a record type,
/// one line per constrained field.
pub fn dump_validators(record: &dyn ValidatedRecord) -> String {
    let mut lines = Vec::new();
    for field in record.fields() {
        if field.validators().is_empty() {
            continue;
        }
        let mut parts = vec![format!("validate type {}", field.spec())];
        parts.extend(field.validators().iter().map(ToString::to_string));
        lines.push(format!("\t{}: {}", field.name(), parts.join(", ")));
    }
    format!("validators for {}:\n{}", record.class_name(), lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::{field, Class, TypeSpec};
    use crate::validators::constraints;

    #[derive(Debug)]
    struct OneField {
        value: Value<'static>,
        fields: Vec<FieldDef>,
    }

    impl OneField {
        fn new(field_def: FieldDef, value: Value<'static>) -> Self {
            Self {
                value,
                fields: vec![field_def],
            }
        }
    }

    impl ValidatedRecord for OneField {
        fn class_name(&self) -> &'static str {
            "OneField"
        }

        fn fields(&self) -> &[FieldDef] {
            &self.fields
        }

        fn field_value(&self, name: &str) -> Option<Value<'_>> {
            match name {
                "value" => Some(self.value.clone()),
                _ => None,
            }
        }
    }

    #[test]
    fn passing_record_returns_ok() {
        let record = OneField::new(
            field("value", TypeSpec::Scalar(Class::Int))
                .constrain(constraints::min(0))
                .build(),
            Value::Int(3),
        );
        assert!(full_validate(&record).is_ok());
    }

    #[test]
    fn type_failure_skips_semantic_validators() {
        let record = OneField::new(
            field("value", TypeSpec::Scalar(Class::Int))
                .constrain(constraints::min(0))
                .constrain(constraints::max(10))
                .build(),
            Value::from("a"),
        );
        let error = full_validate(&record).unwrap_err();
        // one type error only, not three failures
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert_eq!(error.message(), "expect int, got str");
        assert_eq!(error.notes(), ["value \"a\"", "field value"]);
    }

    #[test]
    fn all_chain_failures_are_reported_together() {
        let record = OneField::new(
            field("value", TypeSpec::Scalar(Class::Str))
                .constrain(constraints::min_length(3))
                .constrain(constraints::regex("[0-9]+"))
                .build(),
            Value::from("ab"),
        );
        let error = full_validate(&record).unwrap_err();
        assert_eq!(error.message(), "Field validation errors");
        assert_eq!(error.errors().len(), 2);
        assert_eq!(error.notes(), ["field value"]);
    }

    #[test]
    fn validation_is_idempotent() {
        let record = OneField::new(
            field("value", TypeSpec::Scalar(Class::Int)).build(),
            Value::from("a"),
        );
        let first = full_validate(&record).unwrap_err();
        let second = full_validate(&record).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "produced no value")]
    fn missing_projection_is_a_programmer_error() {
        #[derive(Debug)]
        struct Broken {
            fields: Vec<FieldDef>,
        }
        impl ValidatedRecord for Broken {
            fn class_name(&self) -> &'static str {
                "Broken"
            }
            fn fields(&self) -> &[FieldDef] {
                &self.fields
            }
            fn field_value(&self, _name: &str) -> Option<Value<'_>> {
                None
            }
        }
        let record = Broken {
            fields: vec![field("ghost", TypeSpec::Any).build()],
        };
        let _ = full_validate(&record);
    }

    #[test]
    fn dump_lists_constrained_fields_only() {
        #[derive(Debug)]
        struct Two {
            fields: Vec<FieldDef>,
        }
        impl ValidatedRecord for Two {
            fn class_name(&self) -> &'static str {
                "Two"
            }
            fn fields(&self) -> &[FieldDef] {
                &self.fields
            }
            fn field_value(&self, _name: &str) -> Option<Value<'_>> {
                Some(Value::None)
            }
        }
        let record = Two {
            fields: vec![
                field("plain", TypeSpec::Scalar(Class::Int)).build(),
                field("bounded", TypeSpec::Scalar(Class::Int))
                    .constrain(constraints::min(10))
                    .constrain(constraints::max(20))
                    .build(),
            ],
        };
        assert_eq!(
            dump_validators(&record),
            "validators for Two:\n\tbounded: validate type int, validate min value 10, validate max value 20"
        );
    }
}
