//! # django-rs-restframework
//!
//! The REST framework layer of django-rs: serializer fields derived from
//! ORM model fields.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. You can depend on `django-rs-restframework` to get everything, or
//! depend on individual crates for finer-grained control.
//!
//! ```
//! use django_rs_restframework::prelude::*;
//!
//! let meta = ModelMeta::new(
//!     "shop",
//!     "Product",
//!     vec![FieldDef::new("name", FieldType::CharField).max_length(80)],
//! );
//! let kwargs = get_field_kwargs("name", &meta.fields[0]);
//! assert_eq!(kwargs.max_length, Some(80));
//! ```

/// Core types, settings, logging, and error types.
pub use django_rs_core as core;

/// ORM descriptors: model metadata, field definitions, and validators.
pub use django_rs_db as db;

/// Serializer field classes and the model field mapping rules.
#[cfg(feature = "serializers")]
pub use django_rs_serializers as serializers;

pub use serde;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;

/// The types most programs need.
pub mod prelude {
    pub use django_rs_core::{DjangoError, DjangoResult, RestFrameworkSettings, Settings, SETTINGS};
    pub use django_rs_db::{FieldClass, FieldDef, FieldType, ModelMeta, ModelRef, OnDelete, Value};

    #[cfg(feature = "serializers")]
    pub use django_rs_serializers::{
        get_field_kwargs, get_relation_kwargs, FieldBuilder, FieldKwargs, ModelSerializerConfig,
        RelationInfo, SerializerField, SerializerFieldClass, SerializerFields,
    };
}
