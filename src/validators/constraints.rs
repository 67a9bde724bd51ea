//! Built-in constraint constructors.
//!
//! Each constructor returns a single [`Constraint`] attachable to a field.
//! Every built-in skips `None` values: pair the constraint with a non-optional
//! type descriptor when absence must be an error.

use std::cmp::Ordering;

use regex::Regex;

use crate::core::Value;
use crate::schema::FieldDef;
use crate::validators::Constraint;

/// Check if value is not less than the minimum.
pub fn min(value: impl Into<Value<'static>>) -> Constraint {
    let value = value.into();
    let message = format!("min value {value}");
    Constraint::simple(
        move |v: &Value<'_>| {
            matches!(
                v.partial_cmp(&value),
                Some(Ordering::Greater | Ordering::Equal)
            )
        },
        message,
        true,
    )
}

/// Check if value is not greater than the maximum.
pub fn max(value: impl Into<Value<'static>>) -> Constraint {
    let value = value.into();
    let message = format!("max value {value}");
    Constraint::simple(
        move |v: &Value<'_>| {
            matches!(v.partial_cmp(&value), Some(Ordering::Less | Ordering::Equal))
        },
        message,
        true,
    )
}

/// Check if value is in the inclusive range.
pub fn range(
    min_value: impl Into<Value<'static>>,
    max_value: impl Into<Value<'static>>,
) -> Constraint {
    let min_value = min_value.into();
    let max_value = max_value.into();
    let message = format!("value in [{min_value}, {max_value}]");
    Constraint::simple(
        move |v: &Value<'_>| {
            matches!(
                v.partial_cmp(&min_value),
                Some(Ordering::Greater | Ordering::Equal)
            ) && matches!(
                v.partial_cmp(&max_value),
                Some(Ordering::Less | Ordering::Equal)
            )
        },
        message,
        true,
    )
}

/// Check if the value's length is not less than the minimum length.
pub fn min_length(value: usize) -> Constraint {
    Constraint::simple(
        move |v: &Value<'_>| v.len().map_or(false, |len| len >= value),
        format!("min length {value}"),
        true,
    )
}

/// Check if the value's length is not greater than the maximum length.
pub fn max_length(value: usize) -> Constraint {
    Constraint::simple(
        move |v: &Value<'_>| v.len().map_or(false, |len| len <= value),
        format!("max length {value}"),
        true,
    )
}

/// Check if the value's length is exactly the provided length.
pub fn length(value: usize) -> Constraint {
    Constraint::simple(
        move |v: &Value<'_>| v.len().map_or(false, |len| len == value),
        format!("length {value}"),
        true,
    )
}

/// Check if a string value matches the regular expression.
///
/// The pattern is anchored at both ends when not already, so it always
/// matches the full string. An invalid pattern is a definition-time panic.
///
/// # Example
///
/// ```rust
/// use fieldset::validators::constraints;
///
/// let anchored = constraints::regex("a.?a(c)?");
/// assert_eq!(anchored.to_string(), "validate regular expression `a.?a(c)?`");
/// ```
pub fn regex(pattern: &str) -> Constraint {
    let mut anchored = String::new();
    if !pattern.starts_with('^') {
        anchored.push('^');
    }
    anchored.push_str(pattern);
    if !pattern.ends_with('$') {
        anchored.push('$');
    }
    let compiled = Regex::new(&anchored)
        .unwrap_or_else(|error| panic!("invalid regular expression `{pattern}`: {error}"));
    let display = pattern.trim_start_matches('^').trim_end_matches('$');
    let message = format!("regular expression `{display}`");
    Constraint::simple(
        move |v: &Value<'_>| match v {
            Value::Str(text) => compiled.is_match(text),
            _ => false,
        },
        message,
        true,
    )
}

/// Check if value is one of the provided values.
pub fn one_of<I, T>(values: I) -> Constraint
where
    I: IntoIterator<Item = T>,
    T: Into<Value<'static>>,
{
    let values: Vec<Value<'static>> = values.into_iter().map(Into::into).collect();
    let message = format!("values {}", Value::Tuple(values.clone()));
    Constraint::simple(
        move |v: &Value<'_>| values.iter().any(|expected| v == expected),
        message,
        true,
    )
}

/// Conversion into the dotted path a dependent validator resolves against
/// the record instance.
pub trait IntoFieldPath {
    fn into_field_path(self) -> String;
}

impl IntoFieldPath for &str {
    fn into_field_path(self) -> String {
        self.to_string()
    }
}

impl IntoFieldPath for String {
    fn into_field_path(self) -> String {
        self
    }
}

impl IntoFieldPath for &FieldDef {
    fn into_field_path(self) -> String {
        self.name().to_string()
    }
}

/// Check if the field equals another field of the same record, named by
/// dotted path or by field descriptor.
pub fn equals_field(path: impl IntoFieldPath) -> Constraint {
    Constraint::depend(
        path.into_field_path(),
        |a: &Value<'_>, b: &Value<'_>| a == b,
        "equal",
        true,
    )
}
