//! Field definitions and types for the ORM.
//!
//! This module provides the [`FieldDef`] struct, the [`FieldType`] enum and
//! the [`FieldClass`] hierarchy describing model fields. These mirror
//! Django's `django.db.models.fields` module.

pub mod types;

pub use types::{Choice, FieldClass, FieldDef, FieldType, OnDelete};
