//! Field declarations: the type-descriptor grammar, the structural matcher,
//! and the field/constraint builder.

mod field;
mod matcher;
mod typespec;

pub use field::{field, FieldBuilder, FieldDef, FieldDefault};
pub use matcher::{check_type, check_type_with};
pub use typespec::{Class, TypeSpec};
