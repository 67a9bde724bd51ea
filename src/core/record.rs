//! Record capability trait for validated aggregates.
//!
//! A host record type implements this trait once: it names itself, exposes
//! its declared fields, and projects field values into the runtime value
//! model. Nested-record recursion dispatches on this interface, never on
//! attribute probing.

use std::fmt::Debug;

use crate::core::value::Value;
use crate::error::ValidationError;
use crate::schema::FieldDef;

/// Capability interface of a validated record.
///
/// # Required Traits
///
/// - `Debug`: records appear in diagnostics
/// - `Send + Sync`: field tables typically live in per-type statics
///
/// # Contract
///
/// `fields` returns the declared fields in declaration order and must be
/// stable for the lifetime of the type (hosts usually build it once in a
/// `OnceLock`/`Lazy` static). `field_value` must return `Some` for every
/// declared field; a `None` for a declared field is a programmer error and
/// makes validation panic.
///
/// # Example
///
/// ```rust
/// use std::sync::OnceLock;
///
/// use fieldset::schema::{field, Class, FieldDef, TypeSpec};
/// use fieldset::validators::constraints;
/// use fieldset::{full_validate, ValidatedRecord, Value};
///
/// #[derive(Debug)]
/// struct Account {
///     name: String,
///     age: i64,
/// }
///
/// static FIELDS: OnceLock<Vec<FieldDef>> = OnceLock::new();
///
/// impl ValidatedRecord for Account {
///     fn class_name(&self) -> &'static str {
///         "Account"
///     }
///
///     fn fields(&self) -> &[FieldDef] {
///         FIELDS.get_or_init(|| {
///             vec![
///                 field("name", TypeSpec::Scalar(Class::Str))
///                     .constrain(constraints::min_length(1))
///                     .build(),
///                 field("age", TypeSpec::Scalar(Class::Int))
///                     .constrain(constraints::range(0, 150))
///                     .build(),
///             ]
///         })
///     }
///
///     fn field_value(&self, name: &str) -> Option<Value<'_>> {
///         match name {
///             "name" => Some(Value::from(self.name.as_str())),
///             "age" => Some(Value::Int(self.age)),
///             _ => None,
///         }
///     }
/// }
///
/// let account = Account { name: "Ada".to_string(), age: 36 };
/// assert!(full_validate(&account).is_ok());
///
/// let broken = Account { name: String::new(), age: 200 };
/// assert!(full_validate(&broken).is_err());
/// ```
pub trait ValidatedRecord: Debug + Send + Sync {
    /// Nominal class name, used in diagnostics and nominal scalar checks.
    fn class_name(&self) -> &'static str;

    /// Declared fields in declaration order.
    fn fields(&self) -> &[FieldDef];

    /// Project the current value of one declared field.
    ///
    /// Returns `None` only for names that are not declared fields.
    fn field_value(&self, name: &str) -> Option<Value<'_>>;

    /// Custom cross-field validation hook.
    ///
    /// Runs once per full validation, after every declared-field check.
    /// Errors returned here are folded into the same collected result as
    /// field failures. Default is a no-op.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
