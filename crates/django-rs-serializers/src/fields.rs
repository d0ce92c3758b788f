//! Serializer field classes.
//!
//! [`SerializerFieldClass`] names the serializer field classes of the REST
//! framework together with their inheritance, so that the same
//! [`ClassLookup`](django_rs_core::utils::ClassLookup) machinery used for
//! model fields also resolves serializer fields. A [`SerializerField`] is a
//! class paired with the keyword arguments it is constructed with, and a
//! [`BoundField`] is a serializer field bound to a value for rendering.

use django_rs_core::utils::class_lookup::{ClassKey, Dispatch};
use django_rs_core::utils::text::label_from_field_name;
use django_rs_db::model::ModelRef;

use crate::kwargs::FieldKwargs;

/// The serializer field classes, including the abstract bases `Field` and
/// `RelatedField`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerializerFieldClass {
    Field,
    ReadOnlyField,
    ModelField,
    BooleanField,
    NullBooleanField,
    CharField,
    EmailField,
    SlugField,
    UrlField,
    UuidField,
    IpAddressField,
    IntegerField,
    FloatField,
    DecimalField,
    DateTimeField,
    DateField,
    TimeField,
    DurationField,
    ChoiceField,
    MultipleChoiceField,
    FilePathField,
    FileField,
    ImageField,
    JsonField,
    RelatedField,
    PrimaryKeyRelatedField,
    HyperlinkedRelatedField,
    HyperlinkedIdentityField,
    SlugRelatedField,
    StringRelatedField,
    ManyRelatedField,
    Serializer,
}

impl ClassKey for SerializerFieldClass {
    fn mro(self) -> &'static [Self] {
        use SerializerFieldClass as C;
        match self {
            C::Field => &[C::Field],
            C::ReadOnlyField => &[C::ReadOnlyField, C::Field],
            C::ModelField => &[C::ModelField, C::Field],
            C::BooleanField => &[C::BooleanField, C::Field],
            C::NullBooleanField => &[C::NullBooleanField, C::Field],
            C::CharField => &[C::CharField, C::Field],
            C::EmailField => &[C::EmailField, C::CharField, C::Field],
            C::SlugField => &[C::SlugField, C::CharField, C::Field],
            C::UrlField => &[C::UrlField, C::CharField, C::Field],
            C::UuidField => &[C::UuidField, C::Field],
            C::IpAddressField => &[C::IpAddressField, C::CharField, C::Field],
            C::IntegerField => &[C::IntegerField, C::Field],
            C::FloatField => &[C::FloatField, C::Field],
            C::DecimalField => &[C::DecimalField, C::Field],
            C::DateTimeField => &[C::DateTimeField, C::Field],
            C::DateField => &[C::DateField, C::Field],
            C::TimeField => &[C::TimeField, C::Field],
            C::DurationField => &[C::DurationField, C::Field],
            C::ChoiceField => &[C::ChoiceField, C::Field],
            C::MultipleChoiceField => &[C::MultipleChoiceField, C::ChoiceField, C::Field],
            C::FilePathField => &[C::FilePathField, C::ChoiceField, C::Field],
            C::FileField => &[C::FileField, C::Field],
            C::ImageField => &[C::ImageField, C::FileField, C::Field],
            C::JsonField => &[C::JsonField, C::Field],
            C::RelatedField => &[C::RelatedField, C::Field],
            C::PrimaryKeyRelatedField => &[C::PrimaryKeyRelatedField, C::RelatedField, C::Field],
            C::HyperlinkedRelatedField => &[C::HyperlinkedRelatedField, C::RelatedField, C::Field],
            C::HyperlinkedIdentityField => &[
                C::HyperlinkedIdentityField,
                C::HyperlinkedRelatedField,
                C::RelatedField,
                C::Field,
            ],
            C::SlugRelatedField => &[C::SlugRelatedField, C::RelatedField, C::Field],
            C::StringRelatedField => &[C::StringRelatedField, C::RelatedField, C::Field],
            C::ManyRelatedField => &[C::ManyRelatedField, C::Field],
            C::Serializer => &[C::Serializer, C::Field],
        }
    }

    fn name(self) -> &'static str {
        use SerializerFieldClass as C;
        match self {
            C::Field => "Field",
            C::ReadOnlyField => "ReadOnlyField",
            C::ModelField => "ModelField",
            C::BooleanField => "BooleanField",
            C::NullBooleanField => "NullBooleanField",
            C::CharField => "CharField",
            C::EmailField => "EmailField",
            C::SlugField => "SlugField",
            C::UrlField => "URLField",
            C::UuidField => "UUIDField",
            C::IpAddressField => "IPAddressField",
            C::IntegerField => "IntegerField",
            C::FloatField => "FloatField",
            C::DecimalField => "DecimalField",
            C::DateTimeField => "DateTimeField",
            C::DateField => "DateField",
            C::TimeField => "TimeField",
            C::DurationField => "DurationField",
            C::ChoiceField => "ChoiceField",
            C::MultipleChoiceField => "MultipleChoiceField",
            C::FilePathField => "FilePathField",
            C::FileField => "FileField",
            C::ImageField => "ImageField",
            C::JsonField => "JSONField",
            C::RelatedField => "RelatedField",
            C::PrimaryKeyRelatedField => "PrimaryKeyRelatedField",
            C::HyperlinkedRelatedField => "HyperlinkedRelatedField",
            C::HyperlinkedIdentityField => "HyperlinkedIdentityField",
            C::SlugRelatedField => "SlugRelatedField",
            C::StringRelatedField => "StringRelatedField",
            C::ManyRelatedField => "ManyRelatedField",
            C::Serializer => "Serializer",
        }
    }
}

/// The nested serializer standing in for a relation when building with a
/// depth greater than zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedSerializer {
    /// The related model the nested serializer renders.
    pub model: ModelRef,
    /// The depth left for the nested serializer's own relations.
    pub depth: usize,
}

/// A serializer field: a class and the arguments it is constructed with.
#[derive(Debug, Clone)]
pub struct SerializerField<'a> {
    /// The field class.
    pub class: SerializerFieldClass,
    /// Constructor arguments.
    pub kwargs: FieldKwargs<'a>,
    /// Set for nested serializers.
    pub nested: Option<NestedSerializer>,
}

impl<'a> SerializerField<'a> {
    /// Creates a field of `class` with the given arguments.
    pub const fn new(class: SerializerFieldClass, kwargs: FieldKwargs<'a>) -> Self {
        Self {
            class,
            kwargs,
            nested: None,
        }
    }

    /// Creates a nested serializer field for `nested`.
    pub const fn nested(nested: NestedSerializer, kwargs: FieldKwargs<'a>) -> Self {
        Self {
            class: SerializerFieldClass::Serializer,
            kwargs,
            nested: Some(nested),
        }
    }

    /// Returns `true` if the field is a `class` or a subclass of it.
    pub fn is_instance(&self, class: SerializerFieldClass) -> bool {
        self.class.is_subclass_of(class)
    }

    /// Returns `true` if the field is wrapped in a `ManyRelatedField` when
    /// constructed, which is what related fields with `many=True` become.
    pub fn is_many_related(&self) -> bool {
        self.kwargs.many == Some(true) && self.is_instance(SerializerFieldClass::RelatedField)
    }
}

impl Dispatch for SerializerField<'_> {
    type Key = SerializerFieldClass;

    fn lookup_class(&self) -> SerializerFieldClass {
        if self.is_many_related() {
            SerializerFieldClass::ManyRelatedField
        } else {
            self.class
        }
    }
}

/// A serializer field bound to a value for rendering.
///
/// Bound fields dispatch as the field they wrap.
#[derive(Debug, Clone)]
pub struct BoundField<'f, 'a> {
    /// The field's name in the serializer.
    pub name: String,
    /// The wrapped field.
    pub field: &'f SerializerField<'a>,
    /// The value to render.
    pub value: serde_json::Value,
    /// Validation error messages.
    pub errors: Vec<String>,
}

impl<'f, 'a> BoundField<'f, 'a> {
    /// Binds `field` to `value`.
    pub fn new(name: impl Into<String>, field: &'f SerializerField<'a>, value: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            field,
            value,
            errors: Vec::new(),
        }
    }

    /// Attaches validation errors.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    /// The label to render: the `label` argument, or the name.
    pub fn label(&self) -> String {
        self.field
            .kwargs
            .label
            .clone()
            .unwrap_or_else(|| label_from_field_name(&self.name))
    }
}

impl Dispatch for BoundField<'_, '_> {
    type Key = SerializerFieldClass;

    fn lookup_class(&self) -> SerializerFieldClass {
        self.field.lookup_class()
    }
}
