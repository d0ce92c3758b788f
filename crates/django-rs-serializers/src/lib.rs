//! # django-rs-serializers
//!
//! Derives serializer fields from model fields. Given a model field, the
//! functions in [`field_mapping`] return the keyword arguments the equivalent
//! serializer field is constructed with, and [`model_serializer`] picks the
//! serializer field class through a class-hierarchy lookup.
//!
//! ## Modules
//!
//! - [`field_mapping`] - Model field and relation to [`FieldKwargs`](kwargs::FieldKwargs) rules
//! - [`kwargs`] - The typed keyword-argument mapping
//! - [`fields`] - Serializer field classes, fields and bound fields
//! - [`relations`] - Relation descriptors
//! - [`validators`] - `UniqueValidator` and serializer-side validator handles
//! - [`model_serializer`] - The field builder and serializer options
//! - [`style`] - Default rendering styles

// - result_large_err: DjangoError is the framework error type and should be used consistently
// - doc_markdown: backtick requirements for documentation items are too strict
// - float_cmp: bound values are compared exactly as configured
#![allow(clippy::result_large_err)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod field_mapping;
pub mod fields;
pub mod kwargs;
pub mod model_serializer;
pub mod relations;
pub mod style;
pub mod validators;

// Re-export the most commonly used types at the crate root.
pub use field_mapping::{
    get_detail_view_name, get_field_kwargs, get_nested_relation_kwargs, get_relation_kwargs,
    get_url_kwargs, needs_label,
};
pub use fields::{BoundField, SerializerField, SerializerFieldClass};
pub use kwargs::{FieldKwargs, FieldStyle};
pub use model_serializer::{FieldBuilder, ModelSerializerConfig, SerializerFields};
pub use relations::RelationInfo;
pub use validators::{FieldValidator, UniqueValidator};
