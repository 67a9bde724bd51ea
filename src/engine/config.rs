//! Validation engine configuration.
//!
//! Configuration is carried per validator instance; there is no process-wide
//! mutable state. Both knobs affect diagnostics only, never validation
//! outcomes.

use std::fmt;
use std::sync::Arc;

use crate::core::Value;

/// Formats values for diagnostic notes.
pub type ValueFormatter = Arc<dyn for<'v> Fn(&Value<'v>) -> String + Send + Sync>;

/// Diagnostic configuration of a [`RecordValidator`](crate::RecordValidator).
///
/// # Example
///
/// ```rust
/// use fieldset::{ValidationConfig, Value};
///
/// // Redact string values in error notes.
/// let config = ValidationConfig::default().with_formatter(|value: &Value<'_>| {
///     match value {
///         Value::Str(_) => "<redacted>".to_string(),
///         other => other.to_string(),
///     }
/// });
/// assert_eq!(config.format_value(&Value::from("secret")), "<redacted>");
/// assert_eq!(config.format_value(&Value::Int(3)), "3");
/// ```
#[derive(Clone)]
pub struct ValidationConfig {
    formatter: ValueFormatter,
    log_error_tree: bool,
}

impl ValidationConfig {
    /// Identity formatting, compact failure logging.
    pub fn new() -> Self {
        Self {
            formatter: Arc::new(|value: &Value<'_>| value.to_string()),
            log_error_tree: false,
        }
    }

    /// Replace the diagnostic value formatter (e.g. to redact sensitive
    /// data). Affects only note text.
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: for<'v> Fn(&Value<'v>) -> String + Send + Sync + 'static,
    {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Log the full rendered error tree at debug level when validation
    /// fails, instead of a failure count.
    pub fn with_error_tree_logging(mut self, enabled: bool) -> Self {
        self.log_error_tree = enabled;
        self
    }

    /// Format a value for a diagnostic note.
    pub fn format_value(&self, value: &Value<'_>) -> String {
        (self.formatter)(value)
    }

    pub fn log_error_tree(&self) -> bool {
        self.log_error_tree
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationConfig")
            .field("formatter", &"<fn>")
            .field("log_error_tree", &self.log_error_tree)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_formatting_is_identity() {
        let config = ValidationConfig::default();
        assert_eq!(config.format_value(&Value::from("a")), "\"a\"");
        assert!(!config.log_error_tree());
    }

    #[test]
    fn formatter_override_applies() {
        let config =
            ValidationConfig::default().with_formatter(|_: &Value<'_>| "<hidden>".to_string());
        assert_eq!(config.format_value(&Value::Int(1)), "<hidden>");
    }
}
