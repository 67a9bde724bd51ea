//! Fieldset: field-level validation for structured records
//!
//! Fieldset layers declarative validation over host-defined record types.
//! A record declares, per field, a static type descriptor (including unions
//! and parametrized list/set/tuple generics) and an ordered chain of
//! semantic constraints. One call walks the whole instance and reports
//! every violation together (never just the first) as one structured
//! error whose tree mirrors the record's field/element/nesting structure.
//!
//! # Core Concepts
//!
//! - **Value**: the closed runtime value model fields are projected into
//! - **TypeSpec**: the closed descriptor grammar for declared field types
//! - **Constraint**: an attachable semantic check (`min`, `regex`, ...)
//! - **ValidatedRecord**: the capability trait host records implement
//!
//! # Example
//!
//! ```rust
//! use std::sync::OnceLock;
//!
//! use fieldset::schema::{field, Class, FieldDef, TypeSpec};
//! use fieldset::validators::constraints;
//! use fieldset::{full_validate, ValidatedRecord, Value};
//!
//! #[derive(Debug)]
//! struct Profile {
//!     handle: String,
//!     age: i64,
//!     motto: Option<String>,
//! }
//!
//! static FIELDS: OnceLock<Vec<FieldDef>> = OnceLock::new();
//!
//! impl ValidatedRecord for Profile {
//!     fn class_name(&self) -> &'static str {
//!         "Profile"
//!     }
//!
//!     fn fields(&self) -> &[FieldDef] {
//!         FIELDS.get_or_init(|| {
//!             vec![
//!                 field("handle", TypeSpec::Scalar(Class::Str))
//!                     .constrain(constraints::regex("[a-z_]+"))
//!                     .build(),
//!                 field("age", TypeSpec::Scalar(Class::Int))
//!                     .constrain(constraints::range(13, 120))
//!                     .build(),
//!                 field("motto", TypeSpec::optional(TypeSpec::Scalar(Class::Str)))
//!                     .constrain(constraints::max_length(80))
//!                     .build(),
//!             ]
//!         })
//!     }
//!
//!     fn field_value(&self, name: &str) -> Option<Value<'_>> {
//!         match name {
//!             "handle" => Some(Value::from(self.handle.as_str())),
//!             "age" => Some(Value::Int(self.age)),
//!             "motto" => Some(Value::from(self.motto.as_deref())),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let ok = Profile {
//!     handle: "ada".into(),
//!     age: 36,
//!     motto: None,
//! };
//! assert!(full_validate(&ok).is_ok());
//!
//! let bad = Profile {
//!     handle: "ADA".into(),
//!     age: 7,
//!     motto: None,
//! };
//! let error = full_validate(&bad).unwrap_err();
//! // both violations reported together
//! assert_eq!(error.message(), "Validation errors");
//! assert_eq!(error.errors().len(), 2);
//! ```

pub mod core;
pub mod engine;
pub mod error;
pub mod schema;
pub mod validators;

// Re-export commonly used types
pub use core::{resolve, PathError, ValidatedRecord, Value};
pub use engine::{dump_validators, full_validate, RecordValidator, ValidationConfig};
pub use error::{ErrorCollector, ErrorKind, ValidationError};
pub use schema::{check_type, field, Class, FieldDef, TypeSpec};
pub use validators::Constraint;
