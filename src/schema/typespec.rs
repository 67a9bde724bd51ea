//! The closed type-descriptor grammar for field declarations.
//!
//! A field's expected shape is described once, at definition time, as an
//! explicit descriptor tree. The matcher operates purely on this tree; no
//! runtime reflection is involved anywhere.

use std::fmt;

/// Nominal class of a scalar descriptor.
///
/// Built-in classes cover the scalar variants of the value model; host
/// record classes (and any other named class) use [`Class::Named`] and match
/// nominally, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Bool,
    Int,
    Float,
    Str,
    Uuid,
    DateTime,
    Named(&'static str),
}

impl Class {
    pub fn name(&self) -> &'static str {
        match self {
            Class::Bool => "bool",
            Class::Int => "int",
            Class::Float => "float",
            Class::Str => "str",
            Class::Uuid => "Uuid",
            Class::DateTime => "DateTime",
            Class::Named(name) => name,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type descriptor of a field.
///
/// The variant set is closed; every descriptor is exactly one of these.
/// Descriptors are built once per field and never mutated.
///
/// # Example
///
/// ```rust
/// use fieldset::schema::{Class, TypeSpec};
///
/// let spec = TypeSpec::optional(TypeSpec::list(TypeSpec::Scalar(Class::Int)));
/// assert_eq!(spec.to_string(), "list[int] | None");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// Only the `None` value.
    None,

    /// Any value passes.
    Any,

    /// A nominal class instance.
    Scalar(Class),

    /// Any one of the member descriptors.
    Union(Vec<TypeSpec>),

    /// A list whose every element matches the descriptor.
    List(Box<TypeSpec>),

    /// A set whose every element matches the descriptor.
    Set(Box<TypeSpec>),

    /// A tuple of exactly this arity, matched positionally.
    Tuple(Vec<TypeSpec>),

    /// A tuple of any length whose every element matches the descriptor.
    TupleVariadic(Box<TypeSpec>),

    /// The empty tuple.
    TupleEmpty,
}

impl TypeSpec {
    pub fn list(element: TypeSpec) -> Self {
        TypeSpec::List(Box::new(element))
    }

    pub fn set(element: TypeSpec) -> Self {
        TypeSpec::Set(Box::new(element))
    }

    /// A fixed-arity tuple. An empty element list is the empty tuple.
    pub fn tuple(elements: impl IntoIterator<Item = TypeSpec>) -> Self {
        let elements: Vec<TypeSpec> = elements.into_iter().collect();
        if elements.is_empty() {
            TypeSpec::TupleEmpty
        } else {
            TypeSpec::Tuple(elements)
        }
    }

    /// A tuple of any length over one element descriptor.
    pub fn tuple_of(element: TypeSpec) -> Self {
        TypeSpec::TupleVariadic(Box::new(element))
    }

    /// A union of member descriptors. Must not be empty.
    pub fn union(members: impl IntoIterator<Item = TypeSpec>) -> Self {
        let members: Vec<TypeSpec> = members.into_iter().collect();
        assert!(!members.is_empty(), "expect at least one member for union");
        TypeSpec::Union(members)
    }

    /// Shorthand for `spec | None`.
    pub fn optional(spec: TypeSpec) -> Self {
        TypeSpec::union([spec, TypeSpec::None])
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::None => f.write_str("None"),
            TypeSpec::Any => f.write_str("Any"),
            TypeSpec::Scalar(class) => write!(f, "{class}"),
            TypeSpec::Union(members) => {
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            TypeSpec::List(element) => write!(f, "list[{element}]"),
            TypeSpec::Set(element) => write!(f, "set[{element}]"),
            TypeSpec::Tuple(elements) => {
                f.write_str("tuple[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            TypeSpec::TupleVariadic(element) => write!(f, "tuple[{element}, ...]"),
            TypeSpec::TupleEmpty => f.write_str("tuple[()]"),
        }
    }
}
