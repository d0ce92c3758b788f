//! # django-rs-db
//!
//! ORM descriptors for the django-rs REST framework: model metadata
//! ([`ModelMeta`](model::ModelMeta)), field definitions
//! ([`FieldDef`](fields::FieldDef)) with their class hierarchy, field
//! validators and the backend-agnostic [`Value`](value::Value).
//!
//! ## Module Overview
//!
//! - [`model`] - [`ModelMeta`](model::ModelMeta), [`ModelRef`](model::ModelRef) and manager references
//! - [`fields`] - Field definitions, types and classes
//! - [`value`] - The backend-agnostic [`Value`](value::Value) enum
//! - [`validators`] - Field validators

// These clippy lints are intentionally allowed for the ORM crate:
// - struct_excessive_bools: FieldDef mirrors Django's field API which uses many booleans
// - cast_precision_loss: i64-to-f64 casts are acceptable for validator comparisons
// - result_large_err: DjangoError is the framework error type and should be used consistently
// - doc_markdown: backtick requirements for documentation items are too strict
// - return_self_not_must_use: builder pattern methods are self-documenting
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::result_large_err)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]

pub mod fields;
pub mod model;
pub mod validators;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use fields::{Choice, FieldClass, FieldDef, FieldType, OnDelete};
pub use model::{ManagerRef, ModelMeta, ModelRef};
pub use validators::{Validator, ValidatorKind, ValidatorRef};
pub use value::Value;
