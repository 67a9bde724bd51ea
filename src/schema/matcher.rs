//! Structural conformance checks against type descriptors.
//!
//! The matcher walks a value and a descriptor together and reports every
//! mismatch it finds, not just the first: list, set, and tuple element
//! failures are grouped with per-index notes, and union failures group one
//! child per rejected member.

use tracing::trace;

use crate::core::Value;
use crate::engine::ValidationConfig;
use crate::error::{ErrorCollector, ValidationError};
use crate::schema::typespec::TypeSpec;

/// Check a value against a descriptor with default diagnostics.
///
/// Returns `None` when the value conforms.
///
/// # Example
///
/// ```rust
/// use fieldset::schema::{check_type, Class, TypeSpec};
/// use fieldset::Value;
///
/// assert!(check_type(&Value::Int(3), &TypeSpec::Scalar(Class::Int)).is_none());
///
/// let error = check_type(&Value::from("a"), &TypeSpec::Scalar(Class::Int)).unwrap();
/// assert_eq!(error.message(), "expect int, got str");
/// assert_eq!(error.notes(), ["value \"a\""]);
/// ```
pub fn check_type(value: &Value<'_>, spec: &TypeSpec) -> Option<ValidationError> {
    check_type_with(value, spec, &ValidationConfig::default())
}

/// Check a value against a descriptor, formatting diagnostic notes through
/// the given configuration.
pub fn check_type_with(
    value: &Value<'_>,
    spec: &TypeSpec,
    config: &ValidationConfig,
) -> Option<ValidationError> {
    check(value, spec, true, config)
}

/// Attach the failing value as a note, unless this check is a union-member
/// probe (the union attaches the value once, on the group).
fn annotate(
    error: ValidationError,
    value: &Value<'_>,
    with_value_note: bool,
    config: &ValidationConfig,
) -> ValidationError {
    if with_value_note {
        error.with_note(format!("value {}", config.format_value(value)))
    } else {
        error
    }
}

fn check(
    value: &Value<'_>,
    spec: &TypeSpec,
    with_value_note: bool,
    config: &ValidationConfig,
) -> Option<ValidationError> {
    trace!(spec = %spec, class = value.class_name(), "check type");
    match spec {
        TypeSpec::None => match value {
            Value::None => None,
            _ => Some(annotate(
                ValidationError::type_mismatch("expect None"),
                value,
                with_value_note,
                config,
            )),
        },
        TypeSpec::Any => None,
        TypeSpec::Union(members) => {
            let failures: Vec<ValidationError> = members
                .iter()
                .filter_map(|member| check(value, member, false, config))
                .collect();
            if failures.len() < members.len() {
                return None;
            }
            Some(annotate(
                ValidationError::group(format!("expect {spec}"), failures),
                value,
                with_value_note,
                config,
            ))
        }
        TypeSpec::Scalar(class) => {
            if value.class_name() == class.name() {
                None
            } else {
                Some(annotate(
                    ValidationError::type_mismatch(format!(
                        "expect {class}, got {}",
                        value.class_name()
                    )),
                    value,
                    with_value_note,
                    config,
                ))
            }
        }
        TypeSpec::List(element) => check_list(value, element, with_value_note, config),
        TypeSpec::Set(element) => check_set(value, element, with_value_note, config),
        TypeSpec::Tuple(_) | TypeSpec::TupleVariadic(_) | TypeSpec::TupleEmpty => {
            check_tuple(value, spec, with_value_note, config)
        }
    }
}

fn check_list(
    value: &Value<'_>,
    element: &TypeSpec,
    with_value_note: bool,
    config: &ValidationConfig,
) -> Option<ValidationError> {
    let Value::List(items) = value else {
        return Some(annotate(
            ValidationError::type_mismatch(format!("expect list, got {}", value.class_name())),
            value,
            with_value_note,
            config,
        ));
    };
    let mut collector = ErrorCollector::new();
    collector.extend(items.iter().enumerate().map(|(index, item)| {
        check(item, element, true, config).map(|error| error.with_note(format!("index {index}")))
    }));
    collector.group(format!("expect list of {element}"))
}

fn check_set(
    value: &Value<'_>,
    element: &TypeSpec,
    with_value_note: bool,
    config: &ValidationConfig,
) -> Option<ValidationError> {
    let Value::Set(items) = value else {
        return Some(annotate(
            ValidationError::type_mismatch(format!("expect set, got {}", value.class_name())),
            value,
            with_value_note,
            config,
        ));
    };
    let mut collector = ErrorCollector::new();
    // No index notes: sets are unordered.
    collector.extend(items.iter().map(|item| check(item, element, true, config)));
    collector.group(format!("expect {element}"))
}

fn check_tuple(
    value: &Value<'_>,
    spec: &TypeSpec,
    with_value_note: bool,
    config: &ValidationConfig,
) -> Option<ValidationError> {
    let Value::Tuple(items) = value else {
        return Some(annotate(
            ValidationError::type_mismatch(format!("expect tuple, got {}", value.class_name())),
            value,
            with_value_note,
            config,
        ));
    };
    match spec {
        TypeSpec::TupleEmpty => {
            if items.is_empty() {
                None
            } else {
                Some(annotate(
                    ValidationError::type_mismatch(format!(
                        "expect empty tuple, got {} elements",
                        items.len()
                    )),
                    value,
                    with_value_note,
                    config,
                ))
            }
        }
        TypeSpec::TupleVariadic(element) => {
            let mut collector = ErrorCollector::new();
            collector.extend(items.iter().enumerate().map(|(index, item)| {
                check(item, element, true, config)
                    .map(|error| error.with_note(format!("index {index}")))
            }));
            collector.group(format!("expect tuple of {element}"))
        }
        TypeSpec::Tuple(elements) => {
            if elements.len() != items.len() {
                return Some(annotate(
                    ValidationError::type_mismatch(format!(
                        "expect {} elements in tuple, got {} elements",
                        elements.len(),
                        items.len()
                    )),
                    value,
                    with_value_note,
                    config,
                ));
            }
            let mut collector = ErrorCollector::new();
            collector.extend(items.iter().zip(elements).enumerate().map(
                |(index, (item, element))| {
                    check(item, element, true, config)
                        .map(|error| error.with_note(format!("index {index}")))
                },
            ));
            collector.group(format!("expect {spec}"))
        }
        _ => unreachable!("tuple check dispatched with non-tuple spec"),
    }
}
