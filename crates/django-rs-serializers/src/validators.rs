//! Serializer-level validators.
//!
//! Model validators are reused as-is; [`UniqueValidator`] is the one
//! validator that only exists on the serializer side, because checking
//! uniqueness needs the model's query set. [`FieldValidator`] holds either.

use django_rs_core::{DjangoError, DjangoResult, ValidationError};
use django_rs_db::model::ManagerRef;
use django_rs_db::validators::{ValidatorKind, ValidatorRef};
use django_rs_db::value::Value;

/// How [`UniqueValidator`] compares a value against existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniqueLookup {
    /// Values must differ exactly.
    #[default]
    Exact,
    /// String values must differ ignoring case.
    IExact,
}

/// Validates that a value does not already exist in a query set.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueValidator {
    /// The query set the value must be unique in.
    pub queryset: ManagerRef,
    /// The error message.
    pub message: String,
    /// The comparison used.
    pub lookup: UniqueLookup,
}

impl UniqueValidator {
    /// Creates a validator against `queryset` with the default message.
    pub fn new(queryset: ManagerRef) -> Self {
        Self {
            queryset,
            message: "This field must be unique.".to_string(),
            lookup: UniqueLookup::Exact,
        }
    }

    /// Sets the error message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the comparison used.
    #[must_use]
    pub const fn lookup(mut self, lookup: UniqueLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Validates `value` against the values currently stored.
    ///
    /// `existing` holds the column values of the query set, with the
    /// instance being updated already excluded.
    pub fn validate<'v>(
        &self,
        value: &Value,
        existing: impl IntoIterator<Item = &'v Value>,
    ) -> DjangoResult<()> {
        let taken = existing.into_iter().any(|other| self.matches(value, other));
        if taken {
            tracing::debug!(queryset = %self.queryset, %value, "unique check failed");
            return Err(DjangoError::ValidationError(ValidationError::new(
                self.message.clone(),
                "unique",
            )));
        }
        Ok(())
    }

    fn matches(&self, value: &Value, other: &Value) -> bool {
        match (self.lookup, value, other) {
            (UniqueLookup::IExact, Value::String(a), Value::String(b)) => {
                a.to_lowercase() == b.to_lowercase()
            }
            _ => value == other,
        }
    }
}

/// A validator attached to a serializer field.
#[derive(Debug, Clone)]
pub enum FieldValidator {
    /// A validator taken from the model field.
    Model(ValidatorRef),
    /// A uniqueness check against the model's query set.
    Unique(UniqueValidator),
}

impl FieldValidator {
    /// Returns the validator's name.
    pub fn name(&self) -> &str {
        match self {
            Self::Model(v) => v.name(),
            Self::Unique(_) => "UniqueValidator",
        }
    }

    /// Returns what the validator checks. Uniqueness checks are `Custom`.
    pub fn kind(&self) -> ValidatorKind {
        match self {
            Self::Model(v) => v.kind(),
            Self::Unique(_) => ValidatorKind::Custom,
        }
    }

    /// Returns the unique validator, if this is one.
    pub const fn as_unique(&self) -> Option<&UniqueValidator> {
        match self {
            Self::Unique(v) => Some(v),
            Self::Model(_) => None,
        }
    }
}

impl From<ValidatorRef> for FieldValidator {
    fn from(v: ValidatorRef) -> Self {
        Self::Model(v)
    }
}

impl From<UniqueValidator> for FieldValidator {
    fn from(v: UniqueValidator) -> Self {
        Self::Unique(v)
    }
}
