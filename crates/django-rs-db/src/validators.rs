//! Field validators for the ORM.
//!
//! Validators enforce constraints on field values. Besides validating, each
//! validator reports a [`ValidatorKind`] so that code deriving serializer
//! fields can recognise bounds (max length, min value, ...) and fold them
//! into explicit keyword arguments.
//!
//! [`validate_email`] and [`validate_slug`] return shared built-in instances,
//! the ones fields attach by default. They can be told apart from an
//! equivalent validator constructed by hand with [`is_validate_email`] and
//! [`is_validate_slug`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use django_rs_core::{DjangoError, ValidationError};
use regex::Regex;

use crate::value::Value;

/// What a validator checks, as far as field introspection is concerned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidatorKind {
    /// String length upper bound.
    MaxLength(usize),
    /// String length lower bound.
    MinLength(usize),
    /// Numeric upper bound.
    MaxValue(f64),
    /// Numeric lower bound.
    MinValue(f64),
    /// URL syntax.
    Url,
    /// Email address syntax.
    Email,
    /// Slug syntax.
    Slug,
    /// Anything else.
    Custom,
}

/// A trait for validating field values.
///
/// # Examples
///
/// ```
/// use django_rs_db::validators::{Validator, MaxLengthValidator, ValidatorKind};
/// use django_rs_db::value::Value;
///
/// let v = MaxLengthValidator::new(5);
/// assert!(v.validate(&Value::String("hi".into())).is_ok());
/// assert!(v.validate(&Value::String("toolong".into())).is_err());
/// assert_eq!(v.kind(), ValidatorKind::MaxLength(5));
/// ```
pub trait Validator: Send + Sync + fmt::Debug {
    /// Validates the given value, returning an error if invalid.
    fn validate(&self, value: &Value) -> Result<(), DjangoError>;

    /// Returns a human-readable name for this validator.
    fn name(&self) -> &str;

    /// Returns what this validator checks.
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Custom
    }
}

/// A shared, cloneable validator handle.
pub type ValidatorRef = Arc<dyn Validator>;

fn invalid(message: impl Into<String>, code: &str) -> DjangoError {
    DjangoError::ValidationError(ValidationError::new(message, code))
}

/// Validates that a string value does not exceed a maximum length.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    /// The maximum allowed length.
    pub max_length: usize,
}

impl MaxLengthValidator {
    /// Creates a new `MaxLengthValidator` with the given maximum length.
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), DjangoError> {
        if let Value::String(s) = value {
            let len = s.chars().count();
            if len > self.max_length {
                return Err(invalid(
                    format!(
                        "Ensure this value has at most {} characters (it has {len}).",
                        self.max_length
                    ),
                    "max_length",
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MaxLengthValidator"
    }

    fn kind(&self) -> ValidatorKind {
        ValidatorKind::MaxLength(self.max_length)
    }
}

/// Validates that a string value meets a minimum length requirement.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    /// The minimum required length.
    pub min_length: usize,
}

impl MinLengthValidator {
    /// Creates a new `MinLengthValidator` with the given minimum length.
    pub const fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), DjangoError> {
        if let Value::String(s) = value {
            let len = s.chars().count();
            if len < self.min_length {
                return Err(invalid(
                    format!(
                        "Ensure this value has at least {} characters (it has {len}).",
                        self.min_length
                    ),
                    "min_length",
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MinLengthValidator"
    }

    fn kind(&self) -> ValidatorKind {
        ValidatorKind::MinLength(self.min_length)
    }
}

/// Validates that a numeric value does not exceed a maximum.
#[derive(Debug, Clone)]
pub struct MaxValueValidator {
    /// The maximum allowed value.
    pub max_value: f64,
}

impl MaxValueValidator {
    /// Creates a new `MaxValueValidator` with the given maximum.
    pub const fn new(max_value: f64) -> Self {
        Self { max_value }
    }
}

impl Validator for MaxValueValidator {
    fn validate(&self, value: &Value) -> Result<(), DjangoError> {
        match value.as_number() {
            Some(n) if n > self.max_value => Err(invalid(
                format!(
                    "Ensure this value is less than or equal to {}.",
                    self.max_value
                ),
                "max_value",
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "MaxValueValidator"
    }

    fn kind(&self) -> ValidatorKind {
        ValidatorKind::MaxValue(self.max_value)
    }
}

/// Validates that a numeric value meets a minimum requirement.
#[derive(Debug, Clone)]
pub struct MinValueValidator {
    /// The minimum required value.
    pub min_value: f64,
}

impl MinValueValidator {
    /// Creates a new `MinValueValidator` with the given minimum.
    pub const fn new(min_value: f64) -> Self {
        Self { min_value }
    }
}

impl Validator for MinValueValidator {
    fn validate(&self, value: &Value) -> Result<(), DjangoError> {
        match value.as_number() {
            Some(n) if n < self.min_value => Err(invalid(
                format!(
                    "Ensure this value is greater than or equal to {}.",
                    self.min_value
                ),
                "min_value",
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "MinValueValidator"
    }

    fn kind(&self) -> ValidatorKind {
        ValidatorKind::MinValue(self.min_value)
    }
}

/// Validates that a string is an absolute `http`, `https`, `ftp` or `ftps` URL.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    /// Accepted URL schemes.
    pub schemes: Vec<String>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self {
            schemes: ["http", "https", "ftp", "ftps"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl UrlValidator {
    /// Creates a validator accepting the default schemes.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Validator for UrlValidator {
    fn validate(&self, value: &Value) -> Result<(), DjangoError> {
        static URL_RE: OnceLock<Regex> = OnceLock::new();
        let url_re = URL_RE.get_or_init(|| {
            Regex::new(r"^(?i)([a-z][a-z0-9.+-]*)://[^\s/?#]+(?:[/?#]\S*)?$").unwrap()
        });

        let Some(s) = value.as_str() else {
            return Ok(());
        };
        let valid = url_re.captures(s).is_some_and(|caps| {
            let scheme = caps[1].to_lowercase();
            self.schemes.iter().any(|allowed| *allowed == scheme)
        });
        if valid {
            Ok(())
        } else {
            Err(invalid("Enter a valid URL.", "invalid"))
        }
    }

    fn name(&self) -> &str {
        "URLValidator"
    }

    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Url
    }
}

/// Validates that a string looks like an email address.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    /// The error message.
    pub message: String,
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self {
            message: "Enter a valid email address.".to_string(),
        }
    }
}

impl EmailValidator {
    /// Creates a validator with a custom error message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &Value) -> Result<(), DjangoError> {
        static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
        let email_re = EMAIL_RE.get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*$")
                .unwrap()
        });
        match value.as_str() {
            Some(s) if !email_re.is_match(s) => Err(invalid(self.message.clone(), "invalid")),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "EmailValidator"
    }

    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Email
    }
}

/// Validates that a string consists of letters, numbers, underscores or hyphens.
#[derive(Debug, Clone)]
pub struct SlugValidator {
    /// The error message.
    pub message: String,
}

impl Default for SlugValidator {
    fn default() -> Self {
        Self {
            message: "Enter a valid \"slug\" consisting of letters, numbers, underscores or hyphens."
                .to_string(),
        }
    }
}

impl Validator for SlugValidator {
    fn validate(&self, value: &Value) -> Result<(), DjangoError> {
        static SLUG_RE: OnceLock<Regex> = OnceLock::new();
        let slug_re = SLUG_RE.get_or_init(|| Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap());
        match value.as_str() {
            Some(s) if !slug_re.is_match(s) => Err(invalid(self.message.clone(), "invalid")),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "SlugValidator"
    }

    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Slug
    }
}

/// Returns the shared email validator attached to every `EmailField`.
pub fn validate_email() -> ValidatorRef {
    static INSTANCE: OnceLock<ValidatorRef> = OnceLock::new();
    Arc::clone(INSTANCE.get_or_init(|| Arc::new(EmailValidator::default())))
}

/// Returns the shared slug validator attached to every `SlugField`.
pub fn validate_slug() -> ValidatorRef {
    static INSTANCE: OnceLock<ValidatorRef> = OnceLock::new();
    Arc::clone(INSTANCE.get_or_init(|| Arc::new(SlugValidator::default())))
}

/// Returns `true` if `validator` is the instance returned by [`validate_email`].
pub fn is_validate_email(validator: &ValidatorRef) -> bool {
    Arc::ptr_eq(validator, &validate_email())
}

/// Returns `true` if `validator` is the instance returned by [`validate_slug`].
pub fn is_validate_slug(validator: &ValidatorRef) -> bool {
    Arc::ptr_eq(validator, &validate_slug())
}
