//! Model serializers: serializer fields generated from model metadata.
//!
//! [`FieldBuilder`] decides which serializer field class each model field
//! maps to and which arguments it is constructed with, combining the class
//! lookup table with the rules in [`field_mapping`](crate::field_mapping).
//! [`ModelSerializerConfig`] selects the fields of a model to build, the way
//! a serializer's `Meta` class does.
//!
//! This mirrors the `build_*_field` methods of the REST framework's
//! `ModelSerializer`.

use django_rs_core::logging::serializer_span;
use django_rs_core::settings::RestFrameworkSettings;
use django_rs_core::utils::class_lookup::{ClassKey, ClassLookup};
use django_rs_core::{DjangoError, DjangoResult, SETTINGS};
use django_rs_db::fields::{FieldClass, FieldDef};
use django_rs_db::model::{ModelMeta, ModelRef};

use crate::field_mapping::{
    get_detail_view_name_with, get_field_kwargs, get_nested_relation_kwargs, get_relation_kwargs,
    get_url_kwargs,
};
use crate::fields::{NestedSerializer, SerializerField, SerializerFieldClass};
use crate::kwargs::FieldKwargs;
use crate::relations::RelationInfo;

/// Arguments a `ChoiceField` accepts; everything else is dropped when a
/// model field with choices is mapped.
const CHOICE_FIELD_KWARGS: &[&str] = &[
    "read_only",
    "required",
    "label",
    "help_text",
    "style",
    "validators",
    "allow_null",
    "allow_blank",
    "choices",
];

/// Arguments that make no sense on a read-only field.
const READ_ONLY_DROPPED_KWARGS: &[&str] = &[
    "required",
    "allow_blank",
    "allow_null",
    "min_length",
    "max_length",
    "min_value",
    "max_value",
    "validators",
    "queryset",
];

/// Returns the default model field class to serializer field class table.
///
/// Model field classes not listed resolve to the nearest listed ancestor,
/// which for unknown fields is `Field` mapped to `ModelField`.
pub fn serializer_field_mapping() -> ClassLookup<FieldClass, SerializerFieldClass> {
    use FieldClass as M;
    use SerializerFieldClass as S;
    ClassLookup::new([
        (M::Field, S::ModelField),
        (M::AutoField, S::IntegerField),
        (M::BigIntegerField, S::IntegerField),
        (M::BooleanField, S::BooleanField),
        (M::CharField, S::CharField),
        (M::DateField, S::DateField),
        (M::DateTimeField, S::DateTimeField),
        (M::DecimalField, S::DecimalField),
        (M::DurationField, S::DurationField),
        (M::EmailField, S::EmailField),
        (M::FileField, S::FileField),
        (M::FilePathField, S::FilePathField),
        (M::FloatField, S::FloatField),
        (M::IpAddressField, S::IpAddressField),
        (M::ImageField, S::ImageField),
        (M::IntegerField, S::IntegerField),
        (M::JsonField, S::JsonField),
        (M::NullBooleanField, S::NullBooleanField),
        (M::PositiveIntegerField, S::IntegerField),
        (M::PositiveSmallIntegerField, S::IntegerField),
        (M::SlugField, S::SlugField),
        (M::SmallIntegerField, S::IntegerField),
        (M::TextField, S::CharField),
        (M::TimeField, S::TimeField),
        (M::UrlField, S::UrlField),
        (M::UuidField, S::UuidField),
    ])
}

/// Which model fields a serializer includes.
#[derive(Debug, Clone, Default)]
pub enum SerializerFields {
    /// The default fields: the identity field, then concrete fields, then
    /// forward relations.
    #[default]
    All,
    /// Only the named fields, in the given order.
    Include(Vec<String>),
    /// The default fields except the named ones.
    Exclude(Vec<String>),
}

/// The options of a model serializer, equivalent to its `Meta` class.
#[derive(Debug, Clone)]
pub struct ModelSerializerConfig<'m> {
    /// The model to serialize.
    pub model_meta: &'m ModelMeta,
    /// Which fields to include.
    pub fields: SerializerFields,
    /// How many levels of relations are rendered as nested serializers.
    pub depth: usize,
    /// Fields forced to be read-only.
    pub read_only_fields: Vec<String>,
}

impl<'m> ModelSerializerConfig<'m> {
    /// Creates a config including every default field, without nesting.
    pub const fn new(model_meta: &'m ModelMeta) -> Self {
        Self {
            model_meta,
            fields: SerializerFields::All,
            depth: 0,
            read_only_fields: Vec::new(),
        }
    }

    /// Sets which fields to include.
    #[must_use]
    pub fn with_fields(mut self, fields: SerializerFields) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the nesting depth.
    #[must_use]
    pub const fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Forces the named fields to be read-only.
    #[must_use]
    pub fn with_read_only_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.read_only_fields.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Builds serializer fields from model fields.
///
/// # Examples
///
/// ```
/// use django_rs_db::fields::{FieldDef, FieldType};
/// use django_rs_db::model::ModelMeta;
/// use django_rs_serializers::fields::SerializerFieldClass;
/// use django_rs_serializers::model_serializer::FieldBuilder;
///
/// let meta = ModelMeta::new(
///     "blog",
///     "Post",
///     vec![FieldDef::new("body", FieldType::TextField)],
/// );
/// let field = FieldBuilder::new().build_field("body", &meta, 0).unwrap();
/// assert_eq!(field.class, SerializerFieldClass::CharField);
/// assert!(field.kwargs.model_field.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    field_mapping: ClassLookup<FieldClass, SerializerFieldClass>,
    related_field: SerializerFieldClass,
    url_field_name: String,
    view_name_format: String,
}

impl Default for FieldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldBuilder {
    /// Creates a builder with the default mapping, building relations as
    /// primary keys.
    pub fn new() -> Self {
        Self::from_settings(&RestFrameworkSettings::default())
    }

    /// Creates a builder configured from `settings`.
    pub fn from_settings(settings: &RestFrameworkSettings) -> Self {
        let related_field = if settings.hyperlinked {
            SerializerFieldClass::HyperlinkedRelatedField
        } else {
            SerializerFieldClass::PrimaryKeyRelatedField
        };
        Self {
            field_mapping: serializer_field_mapping(),
            related_field,
            url_field_name: settings.url_field_name.clone(),
            view_name_format: settings.view_name_format.clone(),
        }
    }

    /// Creates a builder configured from the global settings.
    pub fn from_global_settings() -> Self {
        Self::from_settings(&SETTINGS.get_or_default().rest_framework)
    }

    /// Creates a builder building relations as hyperlinks.
    pub fn hyperlinked() -> Self {
        Self::new().with_related_field(SerializerFieldClass::HyperlinkedRelatedField)
    }

    /// Maps `model_class` (and its subclasses without a closer entry) to
    /// `serializer_class`.
    #[must_use]
    pub fn with_mapping(
        mut self,
        model_class: FieldClass,
        serializer_class: SerializerFieldClass,
    ) -> Self {
        self.field_mapping.insert(model_class, serializer_class);
        self
    }

    /// Sets the class flat relations are built with.
    #[must_use]
    pub const fn with_related_field(mut self, class: SerializerFieldClass) -> Self {
        self.related_field = class;
        self
    }

    /// The class flat relations are built with.
    pub const fn related_field(&self) -> SerializerFieldClass {
        self.related_field
    }

    /// The name of the identity field of hyperlinked serializers.
    pub fn url_field_name(&self) -> &str {
        &self.url_field_name
    }

    fn is_hyperlinked(&self) -> bool {
        self.related_field
            .is_subclass_of(SerializerFieldClass::HyperlinkedRelatedField)
    }

    /// Builds the field for a concrete, non-relational model field.
    ///
    /// Fails with a lookup error when the mapping has no entry for the
    /// field's class or any of its ancestors.
    pub fn build_standard_field<'a>(
        &self,
        field_name: &str,
        model_field: &'a FieldDef,
    ) -> DjangoResult<SerializerField<'a>> {
        let mut class = *self.field_mapping.get(model_field)?;
        let mut kwargs = get_field_kwargs(field_name, model_field);

        if kwargs.choices.is_some() {
            class = SerializerFieldClass::ChoiceField;
            kwargs.retain_keys(CHOICE_FIELD_KWARGS);
        }

        if !class.is_subclass_of(SerializerFieldClass::ModelField) {
            kwargs.model_field = None;
        }

        if !class.is_subclass_of(SerializerFieldClass::CharField)
            && !class.is_subclass_of(SerializerFieldClass::ChoiceField)
        {
            kwargs.allow_blank = None;
        }

        tracing::debug!(field = field_name, class = class.name(), "built standard field");
        Ok(SerializerField::new(class, kwargs))
    }

    /// Builds a flat relational field.
    pub fn build_relational_field<'a>(
        &self,
        field_name: &str,
        relation_info: &RelationInfo<'a>,
    ) -> SerializerField<'a> {
        let mut kwargs = get_relation_kwargs(field_name, relation_info);

        if self.is_hyperlinked() {
            kwargs.view_name = Some(get_detail_view_name_with(
                &relation_info.related_model,
                &self.view_name_format,
            ));
        } else {
            kwargs.view_name = None;
        }

        tracing::debug!(
            field = field_name,
            class = self.related_field.name(),
            related = %relation_info.related_model,
            "built relational field"
        );
        SerializerField::new(self.related_field, kwargs)
    }

    /// Builds a nested serializer for a relation. `nested_depth` is the depth
    /// of the serializer being built, at least one.
    pub fn build_nested_field(
        &self,
        field_name: &str,
        relation_info: &RelationInfo<'_>,
        nested_depth: usize,
    ) -> SerializerField<'static> {
        let nested = NestedSerializer {
            model: relation_info.related_model.clone(),
            depth: nested_depth.saturating_sub(1),
        };
        tracing::debug!(field = field_name, model = %nested.model, depth = nested.depth, "built nested field");
        SerializerField::nested(nested, get_nested_relation_kwargs(relation_info))
    }

    /// Builds the identity field of a hyperlinked serializer for `model`.
    pub fn build_url_field(&self, model: &ModelRef) -> SerializerField<'static> {
        let mut kwargs = get_url_kwargs(model);
        kwargs.view_name = Some(get_detail_view_name_with(model, &self.view_name_format));
        SerializerField::new(SerializerFieldClass::HyperlinkedIdentityField, kwargs)
    }

    /// Builds the field named `field_name` of `meta`.
    ///
    /// `pk` names the primary key field and the configured URL field name
    /// the identity field. Relations become nested serializers while
    /// `nested_depth` is positive. Any other unknown name is a configuration
    /// error.
    pub fn build_field<'a>(
        &self,
        field_name: &str,
        meta: &'a ModelMeta,
        nested_depth: usize,
    ) -> DjangoResult<SerializerField<'a>> {
        let model_field = if field_name == "pk" {
            meta.pk_field()
        } else {
            meta.get_field(field_name)
        };

        if let Some(model_field) = model_field {
            return match RelationInfo::forward(model_field) {
                Some(info) if nested_depth > 0 => {
                    Ok(self.build_nested_field(field_name, &info, nested_depth))
                }
                Some(info) => Ok(self.build_relational_field(field_name, &info)),
                None => self.build_standard_field(field_name, model_field),
            };
        }

        if field_name == self.url_field_name {
            return Ok(self.build_url_field(&meta.model_ref()));
        }

        Err(DjangoError::ImproperlyConfigured(format!(
            "Field name `{field_name}` is not valid for model `{}`.",
            meta.object_name
        )))
    }

    /// Returns the fields a serializer of `meta` includes by default: the
    /// identity field, the concrete fields, then the forward relations.
    pub fn default_field_names(&self, meta: &ModelMeta) -> Vec<String> {
        let mut names = Vec::with_capacity(meta.fields.len() + 1);
        if self.is_hyperlinked() {
            names.push(self.url_field_name.clone());
        } else if let Some(pk) = meta.pk_field() {
            names.push(pk.name.to_string());
        }
        names.extend(
            meta.fields
                .iter()
                .filter(|f| !f.primary_key && !f.is_relation())
                .map(|f| f.name.to_string()),
        );
        names.extend(
            meta.fields
                .iter()
                .filter(|f| !f.primary_key && f.is_relation())
                .map(|f| f.name.to_string()),
        );
        names
    }

    fn field_names(&self, config: &ModelSerializerConfig<'_>) -> DjangoResult<Vec<String>> {
        match &config.fields {
            SerializerFields::All => Ok(self.default_field_names(config.model_meta)),
            SerializerFields::Include(names) => Ok(names.clone()),
            SerializerFields::Exclude(excluded) => {
                let mut names = self.default_field_names(config.model_meta);
                for name in excluded {
                    let before = names.len();
                    names.retain(|n| n != name);
                    if names.len() == before {
                        return Err(DjangoError::ImproperlyConfigured(format!(
                            "Cannot exclude the field `{name}`: it is not a field of model `{}`.",
                            config.model_meta.object_name
                        )));
                    }
                }
                Ok(names)
            }
        }
    }

    /// Builds every field selected by `config`, in order.
    pub fn build_fields<'a>(
        &self,
        config: &ModelSerializerConfig<'a>,
    ) -> DjangoResult<Vec<(String, SerializerField<'a>)>> {
        let meta = config.model_meta;
        let span = serializer_span(&meta.model_ref().label());
        let _guard = span.enter();

        let names = self.field_names(config)?;
        let mut fields = Vec::with_capacity(names.len());
        for name in names {
            let mut field = self.build_field(&name, meta, config.depth)?;
            if config.read_only_fields.contains(&name) {
                make_read_only(&mut field.kwargs);
            }
            fields.push((name, field));
        }
        tracing::debug!(count = fields.len(), "built serializer fields");
        Ok(fields)
    }
}

fn make_read_only(kwargs: &mut FieldKwargs<'_>) {
    kwargs.read_only = Some(true);
    for key in READ_ONLY_DROPPED_KWARGS {
        kwargs.remove(key);
    }
}
