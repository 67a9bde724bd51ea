//! Structured validation errors.
//!
//! Failures are plain data: a kind, a message, an ordered list of context
//! notes (`field a`, `index 3`, `value "x"`), and, for grouped failures,
//! nested child errors. The tree a caller receives from a full validation
//! mirrors the record's field/element/nesting structure, so tooling can
//! inspect it instead of parsing strings.

mod collector;

pub use collector::ErrorCollector;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a collected failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Value does not structurally conform to the declared type descriptor.
    TypeMismatch,

    /// A semantic validator predicate rejected the value.
    Constraint,

    /// Container for several failures at the same scope.
    Group,
}

/// One validation failure, possibly grouping nested failures.
///
/// Errors are immutable value objects; enrichment (`with_note`) consumes and
/// returns. Equality is structural, which makes repeated validation of
/// unchanged state comparable.
///
/// # Example
///
/// ```rust
/// use fieldset::{ErrorKind, ValidationError};
///
/// let error = ValidationError::type_mismatch("expect int, got str")
///     .with_note("value \"a\"")
///     .with_note("field age");
/// assert_eq!(error.kind(), ErrorKind::TypeMismatch);
/// assert_eq!(error.notes(), ["value \"a\"", "field age"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    kind: ErrorKind,
    message: String,
    notes: Vec<String>,
    errors: Vec<ValidationError>,
}

impl ValidationError {
    /// A structural type-conformance failure.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::TypeMismatch,
            message: message.into(),
            notes: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// A semantic constraint failure.
    pub fn constraint(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Constraint,
            message: message.into(),
            notes: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// A grouped failure wrapping at least one child error.
    pub fn group(message: impl Into<String>, errors: Vec<ValidationError>) -> Self {
        assert!(
            !errors.is_empty(),
            "group error must contain at least one error"
        );
        Self {
            kind: ErrorKind::Group,
            message: message.into(),
            notes: Vec::new(),
            errors,
        }
    }

    /// Append one context note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Append several context notes in order.
    pub fn with_notes<I>(mut self, notes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.notes.extend(notes.into_iter().map(Into::into));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Child errors of a grouped failure; empty for leaf errors.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn is_group(&self) -> bool {
        self.kind == ErrorKind::Group
    }

    /// Consume the error, yielding its children.
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// A pass-through group: grouped children with no message and no notes
    /// of its own. The collector flattens these instead of nesting them one
    /// level deeper.
    pub(crate) fn is_bare_group(&self) -> bool {
        self.kind == ErrorKind::Group && self.message.is_empty() && self.notes.is_empty()
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        f.write_str(&self.message)?;
        let pad = "  ".repeat(depth + 1);
        for note in &self.notes {
            write!(f, "\n{pad}{note}")?;
        }
        for error in &self.errors {
            write!(f, "\n{pad}- ")?;
            error.render(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_keep_order() {
        let error = ValidationError::constraint("Expect min value 3")
            .with_note("value 1")
            .with_notes(["field a", "field b"]);
        assert_eq!(error.notes(), ["value 1", "field a", "field b"]);
    }

    #[test]
    fn group_requires_children() {
        let error = ValidationError::group(
            "Validation errors",
            vec![ValidationError::type_mismatch("expect None")],
        );
        assert!(error.is_group());
        assert_eq!(error.errors().len(), 1);
    }

    #[test]
    #[should_panic(expected = "at least one error")]
    fn empty_group_is_a_definition_error() {
        let _ = ValidationError::group("empty", Vec::new());
    }

    #[test]
    fn bare_group_detection() {
        let child = ValidationError::constraint("Expect equal");
        assert!(ValidationError::group("", vec![child.clone()]).is_bare_group());
        assert!(!ValidationError::group("caption", vec![child.clone()]).is_bare_group());
        assert!(!ValidationError::group("", vec![child])
            .with_note("key k")
            .is_bare_group());
    }

    #[test]
    fn display_renders_the_tree() {
        let error = ValidationError::group(
            "Validation errors",
            vec![
                ValidationError::type_mismatch("expect int, got str").with_note("field a"),
                ValidationError::constraint("Expect max value 2").with_note("field b"),
            ],
        );
        let rendered = error.to_string();
        assert!(rendered.starts_with("Validation errors"));
        assert!(rendered.contains("- expect int, got str"));
        assert!(rendered.contains("field b"));
    }

    #[test]
    fn serde_round_trip() {
        let error = ValidationError::group(
            "Field validation errors",
            vec![ValidationError::constraint("Expect length 2").with_note("value (1,)")],
        );
        let json = serde_json::to_string(&error).unwrap();
        let back: ValidationError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, back);
    }
}
