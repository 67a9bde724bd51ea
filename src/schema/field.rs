//! Field descriptors and the constraint-attachment builder.
//!
//! A field freezes its name, its type descriptor, its ordered validator
//! chain, and an optional default. Composition is explicit and pure: the
//! builder appends constraint units in order and asserts loudly when a
//! composition would silently clobber an earlier one.

use std::fmt;
use std::sync::Arc;

use crate::core::Value;
use crate::schema::typespec::TypeSpec;
use crate::validators::{Constraint, FieldValidator};

/// Default value metadata of a field, consumed by host constructors.
#[derive(Clone)]
pub enum FieldDefault {
    Value(Value<'static>),
    Factory(Arc<dyn Fn() -> Value<'static> + Send + Sync>),
}

impl FieldDefault {
    /// Produce the default value.
    pub fn produce(&self) -> Value<'static> {
        match self {
            FieldDefault::Value(value) => value.clone(),
            FieldDefault::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Value(value) => write!(f, "FieldDefault::Value({value})"),
            FieldDefault::Factory(_) => f.write_str("FieldDefault::Factory(..)"),
        }
    }
}

/// One declared field of a record type.
///
/// Immutable once built; composing more validators onto a field happens in
/// the builder only and always produces a new descriptor.
#[derive(Clone, Debug)]
pub struct FieldDef {
    name: &'static str,
    spec: TypeSpec,
    validators: Vec<FieldValidator>,
    default: Option<FieldDefault>,
}

impl FieldDef {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn spec(&self) -> &TypeSpec {
        &self.spec
    }

    /// The attached validator chain, in declared order.
    pub fn validators(&self) -> &[FieldValidator] {
        &self.validators
    }

    pub fn default(&self) -> Option<&FieldDefault> {
        self.default.as_ref()
    }
}

/// Open a field declaration.
///
/// # Example
///
/// ```rust
/// use fieldset::schema::{field, Class, TypeSpec};
/// use fieldset::validators::constraints;
///
/// let age = field("age", TypeSpec::Scalar(Class::Int))
///     .constrain(constraints::min(0))
///     .constrain(constraints::max(150))
///     .default_value(0)
///     .build();
/// assert_eq!(age.name(), "age");
/// assert_eq!(age.validators().len(), 2);
/// ```
pub fn field(name: &'static str, spec: TypeSpec) -> FieldBuilder {
    FieldBuilder {
        name,
        spec,
        validators: Vec::new(),
        default: None,
    }
}

/// Builder for one field declaration.
pub struct FieldBuilder {
    name: &'static str,
    spec: TypeSpec,
    validators: Vec<FieldValidator>,
    default: Option<FieldDefault>,
}

impl FieldBuilder {
    /// Append one constraint to the chain. Appending is associative:
    /// `.constrain(a).constrain(b)` yields the chain `[a, b]` however the
    /// calls are grouped.
    pub fn constrain(mut self, constraint: Constraint) -> Self {
        self.validators.push(constraint.into_validator());
        self
    }

    /// Install an ordered batch of constraints.
    ///
    /// Panics if the chain was already composed: two independent batch
    /// compositions on one field would silently overwrite each other.
    pub fn validators(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        assert!(
            self.validators.is_empty(),
            "validator chain was already composed"
        );
        self.validators = constraints
            .into_iter()
            .map(Constraint::into_validator)
            .collect();
        self
    }

    /// Attach a default value. Panics if the field already carries one.
    pub fn default_value(mut self, value: impl Into<Value<'static>>) -> Self {
        assert!(self.default.is_none(), "field already carries a default");
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    /// Attach a default factory. Panics if the field already carries a
    /// default.
    pub fn default_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value<'static> + Send + Sync + 'static,
    {
        assert!(self.default.is_none(), "field already carries a default");
        self.default = Some(FieldDefault::Factory(Arc::new(factory)));
        self
    }

    /// Freeze the field descriptor.
    pub fn build(self) -> FieldDef {
        FieldDef {
            name: self.name,
            spec: self.spec,
            validators: self.validators,
            default: self.default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::typespec::Class;
    use crate::validators::constraints;

    #[test]
    fn constrain_appends_in_order() {
        let built = field("c", TypeSpec::Scalar(Class::Int))
            .constrain(constraints::min(10))
            .constrain(constraints::max(20))
            .build();
        let messages: Vec<&str> = built
            .validators()
            .iter()
            .map(|validator| validator.message())
            .collect();
        assert_eq!(messages, ["min value 10", "max value 20"]);
    }

    #[test]
    fn batch_composition_matches_sequential() {
        let sequential = field("c", TypeSpec::Scalar(Class::Int))
            .constrain(constraints::min(10))
            .constrain(constraints::max(20))
            .build();
        let batch = field("c", TypeSpec::Scalar(Class::Int))
            .validators([constraints::min(10), constraints::max(20)])
            .build();
        let messages = |def: &FieldDef| -> Vec<String> {
            def.validators()
                .iter()
                .map(|validator| validator.to_string())
                .collect()
        };
        assert_eq!(messages(&sequential), messages(&batch));
    }

    #[test]
    #[should_panic(expected = "already composed")]
    fn double_batch_composition_fails_loudly() {
        let _ = field("c", TypeSpec::Scalar(Class::Int))
            .validators([constraints::min(10)])
            .validators([constraints::max(20)]);
    }

    #[test]
    #[should_panic(expected = "already carries a default")]
    fn double_default_fails_loudly() {
        let _ = field("c", TypeSpec::Scalar(Class::Int))
            .default_value(1)
            .default_value(2);
    }

    #[test]
    fn defaults_are_produced_on_demand() {
        let with_value = field("c", TypeSpec::Scalar(Class::Int))
            .default_value(10)
            .build();
        assert_eq!(with_value.default().unwrap().produce(), Value::Int(10));

        let with_factory = field("tags", TypeSpec::list(TypeSpec::Scalar(Class::Str)))
            .default_factory(|| Value::List(Vec::new()))
            .build();
        assert_eq!(
            with_factory.default().unwrap().produce(),
            Value::List(Vec::new())
        );
    }
}
