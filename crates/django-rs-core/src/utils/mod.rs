//! Utility types and functions for the django-rs REST framework crates.
//!
//! - [`class_lookup`]: class-keyed tables resolved through inheritance.
//! - [`text`]: label helpers (`capfirst`, `capitalize`, `camel_case_to_spaces`).

pub mod class_lookup;
pub mod text;

pub use class_lookup::{ClassKey, ClassLookup, Dispatch};
