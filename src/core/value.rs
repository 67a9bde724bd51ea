//! Runtime value model for record fields.
//!
//! Validation never inspects host types directly. Instead, a record projects
//! each field into this closed value model and the type matcher, validators,
//! and path resolver all operate on it. Nested records are carried by
//! reference, so projecting a deeply nested graph stays cheap.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::record::ValidatedRecord;

/// The runtime value of a record field.
///
/// The variant set is closed: every value a field can hold is one of these.
/// `Set` keeps insertion order but is compared as an unordered collection;
/// `Map` keeps insertion order and indexes by string key.
///
/// # Example
///
/// ```rust
/// use fieldset::Value;
///
/// let value = Value::list([1i64, 2, 3]);
/// assert_eq!(value.class_name(), "list");
/// assert_eq!(value.len(), Some(3));
/// ```
#[derive(Clone, Debug)]
pub enum Value<'a> {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    List(Vec<Value<'a>>),
    Set(Vec<Value<'a>>),
    Tuple(Vec<Value<'a>>),
    Map(Vec<(String, Value<'a>)>),
    Record(&'a dyn ValidatedRecord),
}

impl<'a> Value<'a> {
    /// Nominal class of the value, as used in diagnostics and scalar checks.
    pub fn class_name(&self) -> &str {
        match self {
            Value::None => "None",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Uuid(_) => "Uuid",
            Value::DateTime(_) => "DateTime",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Tuple(_) => "tuple",
            Value::Map(_) => "map",
            Value::Record(record) => record.class_name(),
        }
    }

    /// Length of a sized value: character count for strings, element count
    /// for collections. `None` for values without a length.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(text) => Some(text.chars().count()),
            Value::List(items) | Value::Set(items) | Value::Tuple(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => Option::None,
        }
    }

    /// Build a list value from anything convertible.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value<'a>>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a set value. Insertion order is kept for deterministic
    /// diagnostics; equality treats it as unordered.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value<'a>>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    /// Build a tuple value.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value<'a>>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Build a map value from string-keyed entries.
    pub fn map<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Value<'a>>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Wrap a nested validated record.
    pub fn record(record: &'a dyn ValidatedRecord) -> Self {
        Value::Record(record)
    }
}

fn seq_eq(left: &[Value<'_>], right: &[Value<'_>]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| a == b)
}

fn unordered_eq(left: &[Value<'_>], right: &[Value<'_>]) -> bool {
    left.len() == right.len() && left.iter().all(|a| right.iter().any(|b| a == b))
}

fn map_eq(left: &[(String, Value<'_>)], right: &[(String, Value<'_>)]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .all(|(key, value)| right.iter().any(|(k, v)| key == k && value == v))
}

fn record_eq(left: &dyn ValidatedRecord, right: &dyn ValidatedRecord) -> bool {
    if left.class_name() != right.class_name() || left.fields().len() != right.fields().len() {
        return false;
    }
    left.fields().iter().all(|field| {
        match (left.field_value(field.name()), right.field_value(field.name())) {
            (Some(a), Some(b)) => a == b,
            (Option::None, Option::None) => true,
            _ => false,
        }
    })
}

impl<'a, 'b> PartialEq<Value<'b>> for Value<'a> {
    fn eq(&self, other: &Value<'b>) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => seq_eq(a, b),
            (Value::Set(a), Value::Set(b)) => unordered_eq(a, b),
            (Value::Map(a), Value::Map(b)) => map_eq(a, b),
            (Value::Record(a), Value::Record(b)) => record_eq(*a, *b),
            _ => false,
        }
    }
}

fn seq_cmp(left: &[Value<'_>], right: &[Value<'_>]) -> Option<Ordering> {
    for (a, b) in left.iter().zip(right.iter()) {
        match a.partial_cmp(b) {
            Some(Ordering::Equal) => continue,
            other => return other,
        }
    }
    left.len().partial_cmp(&right.len())
}

impl<'a, 'b> PartialOrd<Value<'b>> for Value<'a> {
    fn partial_cmp(&self, other: &Value<'b>) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
            (Value::Uuid(a), Value::Uuid(b)) => a.partial_cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.partial_cmp(b),
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => seq_cmp(a, b),
            _ => Option::None,
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    items: &[Value<'_>],
    open: &str,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value:?}"),
            Value::Str(value) => write!(f, "{value:?}"),
            Value::Uuid(value) => write!(f, "{value}"),
            Value::DateTime(value) => write!(f, "{value}"),
            Value::List(items) => write_joined(f, items, "[", "]"),
            Value::Set(items) => write_joined(f, items, "{", "}"),
            Value::Tuple(items) => {
                if items.len() == 1 {
                    write!(f, "({},)", items[0])
                } else {
                    write_joined(f, items, "(", ")")
                }
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Record(record) => write!(f, "{record:?}"),
        }
    }
}

impl<'a> From<bool> for Value<'a> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<'a> From<i64> for Value<'a> {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl<'a> From<i32> for Value<'a> {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl<'a> From<f64> for Value<'a> {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl<'a> From<&str> for Value<'a> {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl<'a> From<String> for Value<'a> {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<'a> From<Uuid> for Value<'a> {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl<'a> From<DateTime<Utc>> for Value<'a> {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            Option::None => Value::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_are_stable() {
        assert_eq!(Value::None.class_name(), "None");
        assert_eq!(Value::Int(1).class_name(), "int");
        assert_eq!(Value::from("a").class_name(), "str");
        assert_eq!(Value::list([1i64]).class_name(), "list");
        assert_eq!(Value::Uuid(Uuid::nil()).class_name(), "Uuid");
    }

    #[test]
    fn numeric_cross_equality() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_eq!(Value::Float(2.0), Value::Int(2));
        assert_ne!(Value::Int(1), Value::Float(1.5));
    }

    #[test]
    fn set_equality_ignores_order() {
        let left = Value::set([1i64, 2, 3]);
        let right = Value::set([3i64, 1, 2]);
        assert_eq!(left, right);
        assert_ne!(left, Value::set([1i64, 2]));
    }

    #[test]
    fn map_equality_ignores_order() {
        let left = Value::map([("a", 1i64), ("b", 2)]);
        let right = Value::map([("b", 2i64), ("a", 1)]);
        assert_eq!(left, right);
    }

    #[test]
    fn list_and_tuple_are_distinct() {
        assert_ne!(Value::list([1i64]), Value::tuple([1i64]));
    }

    #[test]
    fn ordering_covers_numbers_and_strings() {
        assert!(Value::Int(1) < Value::Int(2));
        assert!(Value::Int(1) < Value::Float(1.5));
        assert!(Value::from("a") < Value::from("b"));
        assert_eq!(
            Value::from("a").partial_cmp(&Value::Int(1)),
            Option::None
        );
    }

    #[test]
    fn length_counts_characters_and_elements() {
        assert_eq!(Value::from("abc").len(), Some(3));
        assert_eq!(Value::list([1i64, 2]).len(), Some(2));
        assert_eq!(Value::Int(1).len(), Option::None);
    }

    #[test]
    fn display_is_repr_like() {
        assert_eq!(Value::from("a").to_string(), "\"a\"");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::tuple([1i64]).to_string(), "(1,)");
        assert_eq!(Value::tuple([1i64, 2]).to_string(), "(1, 2)");
        assert_eq!(Value::set([1i64, 2]).to_string(), "{1, 2}");
        assert_eq!(Value::map([("k", 1i64)]).to_string(), "{\"k\": 1}");
        assert_eq!(Value::from(Option::<i64>::None).to_string(), "None");
    }
}
