//! Dotted-path resolution over the value graph.
//!
//! Dependent validators name the value they compare against with a dotted
//! path relative to the record instance. Resolution walks maps by key,
//! sequences by integer index, and records by field name.

use thiserror::Error;

use crate::core::value::Value;

/// Errors raised for malformed or unresolvable paths.
///
/// These are programmer/schema errors: they are never collected as
/// validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty element in path `{path}`")]
    EmptySegment { path: String },

    #[error("key `{key}` not found at `{prefix}` in path `{path}`")]
    MissingKey {
        key: String,
        prefix: String,
        path: String,
    },

    #[error("expect int as index, got `{segment}` in path `{path}`")]
    BadIndex { segment: String, path: String },

    #[error("out of index at `{prefix}` in path `{path}`")]
    OutOfIndex { prefix: String, path: String },

    #[error("expect attribute `{attribute}` of path `{path}` but not found in {class}")]
    MissingAttribute {
        attribute: String,
        class: String,
        path: String,
    },
}

/// Resolve a dotted path against a root value.
///
/// `""` and `"."` resolve to the root itself. Each segment indexes a map by
/// the raw segment string, a list/tuple by a non-negative integer index, or
/// a record by field name. Anything else fails with a [`PathError`].
///
/// # Example
///
/// ```rust
/// use fieldset::core::{resolve, Value};
///
/// let root = Value::map([("items", Value::list([10i64, 20]))]);
/// assert_eq!(resolve(root.clone(), "items.1").unwrap(), Value::Int(20));
/// assert_eq!(resolve(root.clone(), ".").unwrap(), root);
/// assert!(resolve(root, "items.x").is_err());
/// ```
pub fn resolve<'a>(root: Value<'a>, path: &str) -> Result<Value<'a>, PathError> {
    if path.is_empty() || path == "." {
        return Ok(root);
    }

    let mut value = root;
    let mut prefix: Vec<&str> = Vec::new();
    for segment in path.split('.') {
        if segment.is_empty() {
            return Err(PathError::EmptySegment { path: path.into() });
        }
        prefix.push(segment);
        value = match value {
            Value::Map(entries) => entries
                .into_iter()
                .find(|(key, _)| key == segment)
                .map(|(_, entry)| entry)
                .ok_or_else(|| PathError::MissingKey {
                    key: segment.into(),
                    prefix: prefix.join("."),
                    path: path.into(),
                })?,
            Value::List(items) | Value::Tuple(items) => {
                let index: usize = segment.parse().map_err(|_| PathError::BadIndex {
                    segment: segment.into(),
                    path: path.into(),
                })?;
                items
                    .into_iter()
                    .nth(index)
                    .ok_or_else(|| PathError::OutOfIndex {
                        prefix: prefix.join("."),
                        path: path.into(),
                    })?
            }
            Value::Record(record) => {
                record
                    .field_value(segment)
                    .ok_or_else(|| PathError::MissingAttribute {
                        attribute: segment.into(),
                        class: record.class_name().into(),
                        path: path.into(),
                    })?
            }
            other => {
                return Err(PathError::MissingAttribute {
                    attribute: segment.into(),
                    class: other.class_name().into(),
                    path: path.into(),
                })
            }
        };
    }
    Ok(value)
}
