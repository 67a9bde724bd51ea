//! Failure accumulation across a validation pass.
//!
//! Validation must not stop at the first failure: a record with three bad
//! fields reports all three. The collector gathers every failure at one
//! scope and collapses to nothing, the sole error, or a captioned group.

use crate::error::ValidationError;

/// Accumulates zero or more validation failures.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<ValidationError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error if there is one. No-op on `None`.
    pub fn add(&mut self, error: Option<ValidationError>) -> &mut Self {
        if let Some(error) = error {
            self.errors.push(error);
        }
        self
    }

    /// Append every error in the sequence, skipping `None`s.
    pub fn extend<I>(&mut self, errors: I) -> &mut Self
    where
        I: IntoIterator<Item = Option<ValidationError>>,
    {
        for error in errors {
            self.add(error);
        }
        self
    }

    /// Run a fallible operation, routing its error into the collector with
    /// `notes` attached instead of propagating it.
    ///
    /// A pass-through group (no message, no notes of its own) is flattened:
    /// its children are re-added individually, each with `notes`. A group
    /// that already carries a message or notes is kept intact. This policy
    /// controls the observable nesting depth of reported errors; do not
    /// simplify it.
    pub fn scoped<F>(&mut self, notes: &[String], op: F) -> &mut Self
    where
        F: FnOnce() -> Result<(), ValidationError>,
    {
        if let Err(error) = op() {
            if error.is_bare_group() {
                for child in error.into_errors() {
                    self.add(Some(child.with_notes(notes.iter().cloned())));
                }
            } else {
                self.add(Some(error.with_notes(notes.iter().cloned())));
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `None` if nothing was collected, else a group captioned `message`
    /// wrapping everything collected.
    pub fn group(self, message: impl Into<String>) -> Option<ValidationError> {
        if self.errors.is_empty() {
            return None;
        }
        Some(ValidationError::group(message, self.errors))
    }

    /// `None` if nothing was collected, the sole error as-is if exactly one
    /// was (the message is discarded), else a group captioned `message`.
    pub fn single_or_group(mut self, message: impl Into<String>) -> Option<ValidationError> {
        if self.errors.len() == 1 {
            return Some(self.errors.remove(0));
        }
        self.group(message)
    }
}
