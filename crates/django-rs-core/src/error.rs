//! Core error types for the django-rs REST framework layer.
//!
//! [`DjangoError`] covers the handful of failures the serializer layer can
//! produce: class lookups that find no registered ancestor, validation
//! failures raised by field validators, configuration problems and I/O while
//! loading settings.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Represents a validation error with optional field-level errors.
///
/// Validation errors can be either simple (a single message) or compound
/// (containing per-field error lists), mirroring Django's `ValidationError`.
///
/// # Examples
///
/// ```
/// use django_rs_core::error::ValidationError;
///
/// let err = ValidationError::new("This field must be unique.", "unique");
/// assert_eq!(err.code, "unique");
///
/// let mut field_errors = std::collections::HashMap::new();
/// field_errors.insert("slug".to_string(), vec![err]);
/// let err = ValidationError::with_field_errors(field_errors);
/// assert!(err.to_string().contains("slug"));
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the type of validation failure (e.g. "unique", "max_length").
    pub code: String,
    /// Additional parameters providing context for the error message.
    pub params: HashMap<String, String>,
    /// Per-field validation errors, keyed by field name.
    pub field_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
            field_errors: HashMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-field errors.
    pub fn with_field_errors(field_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            params: HashMap::new(),
            field_errors,
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else if !self.field_errors.is_empty() {
            let mut first = true;
            for (field, errors) in &self.field_errors {
                for error in errors {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for the django-rs REST framework crates.
#[derive(Error, Debug)]
pub enum DjangoError {
    // ── Lookup ───────────────────────────────────────────────────────

    /// No class in a value's method resolution order is registered in a
    /// class lookup table.
    #[error("Lookup error: {0}")]
    LookupError(String),

    // ── Validation ───────────────────────────────────────────────────

    /// One or more values failed validation.
    #[error("Validation error: {0}")]
    ValidationError(ValidationError),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The framework is improperly configured.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred while rendering keyword arguments or settings.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DjangoError {
    /// Returns `true` if this error is a failed class lookup.
    pub const fn is_lookup_error(&self) -> bool {
        matches!(self, Self::LookupError(_))
    }

    /// Returns the validation error carried by this error, if any.
    pub const fn as_validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::ValidationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for DjangoError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError(err)
    }
}

impl From<serde_json::Error> for DjangoError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, DjangoError>`.
pub type DjangoResult<T> = Result<T, DjangoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_simple() {
        let err = ValidationError::new("This field must be unique.", "unique");
        assert_eq!(err.to_string(), "This field must be unique.");
    }

    #[test]
    fn test_validation_error_display_field_errors() {
        let mut field_errors = HashMap::new();
        field_errors.insert(
            "email".to_string(),
            vec![ValidationError::new("Invalid email.", "invalid")],
        );
        let err = ValidationError::with_field_errors(field_errors);
        assert!(err.to_string().contains("email: Invalid email."));
    }

    #[test]
    fn test_validation_error_with_param() {
        let err = ValidationError::new("Too short.", "min_length").with_param("min", "8");
        assert_eq!(err.params.get("min").unwrap(), "8");
    }

    #[test]
    fn test_lookup_error_display() {
        let err = DjangoError::LookupError("Class CharField not found in lookup.".into());
        assert_eq!(
            err.to_string(),
            "Lookup error: Class CharField not found in lookup."
        );
        assert!(err.is_lookup_error());
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: DjangoError = ValidationError::new("bad", "invalid").into();
        assert!(!err.is_lookup_error());
        assert_eq!(err.as_validation_error().unwrap().code, "invalid");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let django_err: DjangoError = io_err.into();
        assert!(django_err.to_string().contains("file missing"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DjangoError = json_err.into();
        assert!(matches!(err, DjangoError::SerializationError(_)));
    }
}
