//! Mapping of model fields to serializer field keyword arguments.
//!
//! Each function here inspects a model field (or a relation) and returns the
//! [`FieldKwargs`] the equivalent serializer field should be constructed
//! with. The functions are pure: they read the descriptors they are given and
//! build a fresh mapping on every call.
//!
//! Two rules end [`get_field_kwargs`] early. Read-only fields (auto fields
//! and non-editable fields) and choice fields accept no further arguments,
//! so nothing after those rules is added for them.

use django_rs_core::utils::text::{capfirst, label_from_field_name};
use django_rs_db::fields::{FieldClass, FieldDef};
use django_rs_db::model::ModelRef;
use django_rs_db::validators::{is_validate_email, is_validate_slug, ValidatorKind, ValidatorRef};

use crate::kwargs::{FieldKwargs, FieldStyle};
use crate::relations::{clean_manytomany_helptext, RelationInfo};
use crate::validators::{FieldValidator, UniqueValidator};

/// The view name format used when none is configured.
pub const DEFAULT_VIEW_NAME_FORMAT: &str = "{model_name}-detail";

/// Returns `true` if the label derived from the model field's verbose name
/// differs from the label a serializer would derive from the field name.
///
/// # Examples
///
/// ```
/// use django_rs_db::fields::{FieldDef, FieldType};
/// use django_rs_serializers::field_mapping::needs_label;
///
/// let plain = FieldDef::new("first_name", FieldType::CharField);
/// assert!(!needs_label(&plain, "first_name"));
///
/// let custom = plain.verbose_name("given name");
/// assert!(needs_label(&custom, "first_name"));
/// ```
pub fn needs_label(model_field: &FieldDef, field_name: &str) -> bool {
    capfirst(&model_field.verbose_name) != label_from_field_name(field_name)
}

/// Returns the name of the detail view for instances of `model`, using the
/// default `"{model_name}-detail"` format.
///
/// # Examples
///
/// ```
/// use django_rs_db::model::ModelRef;
/// use django_rs_serializers::field_mapping::get_detail_view_name;
///
/// let model = ModelRef::new("blog", "BlogPost");
/// assert_eq!(get_detail_view_name(&model), "blogpost-detail");
/// ```
pub fn get_detail_view_name(model: &ModelRef) -> String {
    get_detail_view_name_with(model, DEFAULT_VIEW_NAME_FORMAT)
}

/// Returns the name of the detail view for instances of `model`.
///
/// `{model_name}` in `format` is replaced with the lowercased model name and
/// `{app_label}` with the model's application label.
pub fn get_detail_view_name_with(model: &ModelRef, format: &str) -> String {
    format
        .replace("{app_label}", &model.app_label)
        .replace("{model_name}", &model.model_name())
}

fn label_kwarg(model_field: &FieldDef, field_name: &str) -> Option<String> {
    if !model_field.verbose_name.is_empty() && needs_label(model_field, field_name) {
        Some(capfirst(&model_field.verbose_name))
    } else {
        None
    }
}

fn unique_validator(model_field: &FieldDef) -> Option<FieldValidator> {
    if !model_field.unique {
        return None;
    }
    if let Some(model) = &model_field.model {
        Some(UniqueValidator::new(model.default_manager()).into())
    } else {
        tracing::warn!(
            field = model_field.name,
            "unique field is not attached to a model; skipping UniqueValidator"
        );
        None
    }
}

/// Takes the first limit reported by `extract` and removes every validator
/// it matches.
fn take_limit<T>(
    validators: &mut Vec<ValidatorRef>,
    extract: impl Fn(ValidatorKind) -> Option<T>,
) -> Option<T> {
    let limit = validators.iter().find_map(|v| extract(v.kind()))?;
    validators.retain(|v| extract(v.kind()).is_none());
    Some(limit)
}

/// Builds the keyword arguments for a non-relational serializer field.
///
/// # Examples
///
/// ```
/// use django_rs_db::fields::{FieldDef, FieldType};
/// use django_rs_serializers::field_mapping::get_field_kwargs;
///
/// let field = FieldDef::new("title", FieldType::CharField).max_length(50);
/// let kwargs = get_field_kwargs("title", &field);
/// assert_eq!(kwargs.max_length, Some(50));
/// assert!(kwargs.validators.is_none());
/// ```
pub fn get_field_kwargs<'a>(field_name: &str, model_field: &'a FieldDef) -> FieldKwargs<'a> {
    let mut validators = model_field.all_validators();

    // Only consumed by `ModelField`; builders drop it for everything else.
    let mut kwargs = FieldKwargs {
        model_field: Some(model_field),
        ..FieldKwargs::default()
    };

    kwargs.label = label_kwarg(model_field, field_name);

    if !model_field.help_text.is_empty() {
        kwargs.help_text = Some(model_field.help_text.clone());
    }

    kwargs.max_digits = model_field.max_digits();
    kwargs.decimal_places = model_field.decimal_places();

    if model_field.is_instance(FieldClass::TextField) {
        kwargs.style = Some(FieldStyle::template("textarea.html"));
    }

    if model_field.is_instance(FieldClass::AutoField) || !model_field.editable {
        kwargs.read_only = Some(true);
        tracing::trace!(field = field_name, "read-only field");
        return kwargs;
    }

    if model_field.has_default() || model_field.blank || model_field.null {
        kwargs.required = Some(false);
    }

    if model_field.null && !model_field.is_instance(FieldClass::NullBooleanField) {
        kwargs.allow_null = Some(true);
    }

    if model_field.blank {
        kwargs.allow_blank = Some(true);
    }

    let choices = model_field.flatchoices();
    if !choices.is_empty() {
        tracing::trace!(field = field_name, count = choices.len(), "choice field");
        kwargs.choices = Some(choices);
        return kwargs;
    }

    if let Some(max_length) = model_field.max_length {
        if model_field.is_instance(FieldClass::CharField) {
            kwargs.max_length = Some(max_length);
            validators.retain(|v| !matches!(v.kind(), ValidatorKind::MaxLength(_)));
        }
    }

    kwargs.min_length = take_limit(&mut validators, |kind| match kind {
        ValidatorKind::MinLength(limit) => Some(limit),
        _ => None,
    });
    kwargs.max_value = take_limit(&mut validators, |kind| match kind {
        ValidatorKind::MaxValue(limit) => Some(limit),
        _ => None,
    });
    kwargs.min_value = take_limit(&mut validators, |kind| match kind {
        ValidatorKind::MinValue(limit) => Some(limit),
        _ => None,
    });

    // The serializer field classes add these validators themselves.
    if model_field.is_instance(FieldClass::UrlField) {
        validators.retain(|v| v.kind() != ValidatorKind::Url);
    }
    if model_field.is_instance(FieldClass::EmailField) {
        validators.retain(|v| !is_validate_email(v));
    }
    if model_field.is_instance(FieldClass::SlugField) {
        validators.retain(|v| !is_validate_slug(v));
    }

    let mut validator_kwarg: Vec<FieldValidator> =
        validators.into_iter().map(FieldValidator::from).collect();
    validator_kwarg.extend(unique_validator(model_field));

    if !validator_kwarg.is_empty() {
        kwargs.validators = Some(validator_kwarg);
    }

    tracing::trace!(field = field_name, keys = ?kwargs.keys(), "field kwargs");
    kwargs
}

/// Builds the keyword arguments for a flat relational serializer field.
///
/// The related model's default manager seeds `queryset`, which is dropped
/// again when the relation turns out to be read-only.
pub fn get_relation_kwargs<'a>(
    field_name: &str,
    relation_info: &RelationInfo<'a>,
) -> FieldKwargs<'a> {
    let mut kwargs = FieldKwargs {
        queryset: Some(relation_info.related_model.default_manager()),
        view_name: Some(get_detail_view_name(&relation_info.related_model)),
        ..FieldKwargs::default()
    };

    if relation_info.to_many {
        kwargs.many = Some(true);
    }

    if relation_info.has_through_model {
        kwargs.read_only = Some(true);
        kwargs.queryset = None;
    }

    if let Some(model_field) = relation_info.model_field {
        kwargs.label = label_kwarg(model_field, field_name);

        let help_text = clean_manytomany_helptext(&model_field.help_text);
        if !help_text.is_empty() {
            kwargs.help_text = Some(help_text.to_string());
        }

        if !model_field.editable {
            kwargs.read_only = Some(true);
            kwargs.queryset = None;
        }

        if kwargs.is_read_only() {
            tracing::trace!(field = field_name, "read-only relation");
            return kwargs;
        }

        if model_field.has_default() || model_field.null {
            kwargs.required = Some(false);
        }

        if model_field.null {
            kwargs.allow_null = Some(true);
        }

        let mut validators: Vec<FieldValidator> = model_field
            .all_validators()
            .into_iter()
            .map(FieldValidator::from)
            .collect();
        validators.extend(unique_validator(model_field));
        if !validators.is_empty() {
            kwargs.validators = Some(validators);
        }
    }

    tracing::trace!(field = field_name, keys = ?kwargs.keys(), "relation kwargs");
    kwargs
}

/// Builds the keyword arguments for a nested serializer standing in for a
/// relation. Nested relations are always read-only.
pub fn get_nested_relation_kwargs(relation_info: &RelationInfo<'_>) -> FieldKwargs<'static> {
    FieldKwargs {
        read_only: Some(true),
        many: relation_info.to_many.then_some(true),
        ..FieldKwargs::default()
    }
}

/// Builds the keyword arguments for the identity field of `model`.
pub fn get_url_kwargs(model: &ModelRef) -> FieldKwargs<'static> {
    FieldKwargs {
        view_name: Some(get_detail_view_name(model)),
        ..FieldKwargs::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use django_rs_db::fields::{FieldType, OnDelete};
    use django_rs_db::model::ModelMeta;
    use django_rs_db::validators::{
        validate_email, EmailValidator, MaxValueValidator, MinLengthValidator, MinValueValidator,
        UrlValidator,
    };
    use django_rs_db::value::Value;
    use std::sync::Arc;

    fn attached(field: FieldDef) -> ModelMeta {
        ModelMeta::new("shop", "Product", vec![field])
    }

    fn validator_names(kwargs: &FieldKwargs<'_>) -> Vec<String> {
        kwargs
            .validators
            .iter()
            .flatten()
            .map(|v| v.name().to_string())
            .collect()
    }

    #[test]
    fn test_needs_label() {
        let field = FieldDef::new("first_name", FieldType::CharField);
        assert!(!needs_label(&field, "first_name"));
        assert!(needs_label(&field, "given_name"));

        let field = FieldDef::new("url", FieldType::UrlField).verbose_name("URL");
        assert!(needs_label(&field, "url"));

        let field = FieldDef::new("sku", FieldType::CharField).verbose_name("SKU code");
        assert!(needs_label(&field, "sku_code"));
    }

    #[test]
    fn test_needs_label_capitalization() {
        let field = FieldDef::new("title", FieldType::CharField).verbose_name("title");
        assert!(!needs_label(&field, "title"));
        let field = FieldDef::new("title", FieldType::CharField).verbose_name("Title");
        assert!(!needs_label(&field, "title"));
    }

    #[test]
    fn test_detail_view_name() {
        let model = ModelRef::new("auth", "User");
        assert_eq!(get_detail_view_name(&model), "user-detail");
        assert_eq!(
            get_detail_view_name_with(&model, "{app_label}:{model_name}-detail"),
            "auth:user-detail"
        );
    }

    #[test]
    fn test_plain_field() {
        let field = FieldDef::new("count", FieldType::IntegerField);
        let kwargs = get_field_kwargs("count", &field);
        assert_eq!(kwargs.keys(), ["model_field"]);
    }

    #[test]
    fn test_label_and_help_text() {
        let field = FieldDef::new("name", FieldType::CharField)
            .verbose_name("product name")
            .help_text("Shown on the shelf.");
        let kwargs = get_field_kwargs("name", &field);
        assert_eq!(kwargs.label.as_deref(), Some("Product name"));
        assert_eq!(kwargs.help_text.as_deref(), Some("Shown on the shelf."));
    }

    #[test]
    fn test_empty_verbose_name_has_no_label() {
        let field = FieldDef::new("name", FieldType::CharField).verbose_name("");
        assert!(get_field_kwargs("name", &field).label.is_none());
    }

    #[test]
    fn test_decimal_field() {
        let field = FieldDef::new(
            "price",
            FieldType::DecimalField {
                max_digits: 8,
                decimal_places: 2,
            },
        );
        let kwargs = get_field_kwargs("price", &field);
        assert_eq!(kwargs.max_digits, Some(8));
        assert_eq!(kwargs.decimal_places, Some(2));
    }

    #[test]
    fn test_text_field_style() {
        let field = FieldDef::new("body", FieldType::TextField);
        let kwargs = get_field_kwargs("body", &field);
        assert_eq!(kwargs.style, Some(FieldStyle::template("textarea.html")));
    }

    #[test]
    fn test_auto_field_is_read_only() {
        let field = FieldDef::new("id", FieldType::BigAutoField).primary_key();
        let kwargs = get_field_kwargs("id", &field);
        assert_eq!(kwargs.keys(), ["model_field", "read_only"]);

        let field = FieldDef::new("id", FieldType::AutoField)
            .primary_key()
            .verbose_name("ID");
        let kwargs = get_field_kwargs("id", &field);
        assert_eq!(kwargs.keys(), ["model_field", "label", "read_only"]);
        assert_eq!(kwargs.label.as_deref(), Some("ID"));
    }

    #[test]
    fn test_non_editable_returns_early() {
        let meta = attached(
            FieldDef::new("code", FieldType::CharField)
                .max_length(10)
                .unique()
                .nullable()
                .not_editable(),
        );
        let kwargs = get_field_kwargs("code", &meta.fields[0]);
        assert_eq!(kwargs.keys(), ["model_field", "read_only"]);
        assert!(kwargs.is_read_only());
    }

    #[test]
    fn test_optional_flags() {
        let field = FieldDef::new("note", FieldType::CharField).nullable().blank();
        let kwargs = get_field_kwargs("note", &field);
        assert_eq!(kwargs.required, Some(false));
        assert_eq!(kwargs.allow_null, Some(true));
        assert_eq!(kwargs.allow_blank, Some(true));

        let field = FieldDef::new("qty", FieldType::IntegerField).default(1);
        let kwargs = get_field_kwargs("qty", &field);
        assert_eq!(kwargs.required, Some(false));
        assert!(kwargs.allow_null.is_none());
        assert!(kwargs.allow_blank.is_none());
    }

    #[test]
    fn test_null_boolean_does_not_allow_null() {
        let field = FieldDef::new("flag", FieldType::NullBooleanField);
        let kwargs = get_field_kwargs("flag", &field);
        assert_eq!(kwargs.keys(), ["model_field", "required", "allow_blank"]);
        assert_eq!(kwargs.required, Some(false));
        assert_eq!(kwargs.allow_blank, Some(true));
        assert!(kwargs.allow_null.is_none());
    }

    #[test]
    fn test_boolean_is_optional() {
        let field = FieldDef::new("active", FieldType::BooleanField);
        let kwargs = get_field_kwargs("active", &field);
        assert_eq!(kwargs.keys(), ["model_field", "required", "allow_blank"]);

        let field = FieldDef::new("active", FieldType::BooleanField).nullable();
        let kwargs = get_field_kwargs("active", &field);
        assert_eq!(kwargs.allow_null, Some(true));
    }

    #[test]
    fn test_choices_return_early() {
        let meta = attached(
            FieldDef::new("size", FieldType::CharField)
                .max_length(1)
                .unique()
                .validator(Arc::new(MinLengthValidator::new(1)))
                .choices([("s", "Small"), ("l", "Large")]),
        );
        let kwargs = get_field_kwargs("size", &meta.fields[0]);
        assert_eq!(kwargs.keys(), ["model_field", "choices"]);
        let choices = kwargs.choices.unwrap();
        assert_eq!(choices[0], (Value::from("s"), "Small".to_string()));
        assert_eq!(choices.len(), 2);
    }

    #[test]
    fn test_grouped_choices_are_flattened() {
        let field = FieldDef::new("media", FieldType::CharField)
            .choice_group("Audio", [("cd", "CD")])
            .choice_group("Video", [("dvd", "DVD")]);
        let kwargs = get_field_kwargs("media", &field);
        assert_eq!(kwargs.choices.map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_char_field_max_length() {
        let field = FieldDef::new("title", FieldType::CharField).max_length(50);
        let kwargs = get_field_kwargs("title", &field);
        assert_eq!(kwargs.max_length, Some(50));
        assert!(kwargs.validators.is_none());
    }

    #[test]
    fn test_text_field_max_length_not_passed() {
        let field = FieldDef::new("body", FieldType::TextField).max_length(500);
        let kwargs = get_field_kwargs("body", &field);
        assert!(kwargs.max_length.is_none());
    }

    #[test]
    fn test_length_and_value_bounds() {
        let field = FieldDef::new("rating", FieldType::IntegerField)
            .validator(Arc::new(MinValueValidator::new(1.0)))
            .validator(Arc::new(MaxValueValidator::new(5.0)))
            .validator(Arc::new(MaxValueValidator::new(10.0)));
        let kwargs = get_field_kwargs("rating", &field);
        assert_eq!(kwargs.min_value, Some(1.0));
        assert_eq!(kwargs.max_value, Some(5.0));
        assert!(kwargs.validators.is_none());

        let field = FieldDef::new("code", FieldType::CharField)
            .max_length(8)
            .validator(Arc::new(MinLengthValidator::new(4)));
        let kwargs = get_field_kwargs("code", &field);
        assert_eq!(kwargs.min_length, Some(4));
        assert_eq!(kwargs.max_length, Some(8));
        assert!(kwargs.validators.is_none());
    }

    #[test]
    fn test_url_validators_dropped() {
        let field =
            FieldDef::new("homepage", FieldType::UrlField).validator(Arc::new(UrlValidator::new()));
        let kwargs = get_field_kwargs("homepage", &field);
        assert_eq!(kwargs.max_length, Some(200));
        assert!(kwargs.validators.is_none());
    }

    #[test]
    fn test_only_builtin_email_validator_dropped() {
        let field = FieldDef::new("email", FieldType::EmailField)
            .validator(Arc::new(EmailValidator::with_message("Bad address.")));
        let kwargs = get_field_kwargs("email", &field);
        assert_eq!(validator_names(&kwargs), ["EmailValidator"]);
        let kept = &kwargs.validators.as_ref().unwrap()[0];
        assert!(matches!(kept, FieldValidator::Model(v) if !is_validate_email(v)));
    }

    #[test]
    fn test_builtin_validators_dropped() {
        let field = FieldDef::new("email", FieldType::EmailField);
        assert!(get_field_kwargs("email", &field).validators.is_none());
        let field = FieldDef::new("slug", FieldType::SlugField);
        assert!(get_field_kwargs("slug", &field).validators.is_none());
    }

    #[test]
    fn test_builtin_email_validator_kept_on_char_field() {
        let field = FieldDef::new("contact", FieldType::CharField).validator(validate_email());
        let kwargs = get_field_kwargs("contact", &field);
        assert_eq!(validator_names(&kwargs), ["EmailValidator"]);
    }

    #[test]
    fn test_unique_adds_validator() {
        let meta = attached(FieldDef::new("sku", FieldType::CharField).max_length(12).unique());
        let kwargs = get_field_kwargs("sku", &meta.fields[0]);
        assert_eq!(validator_names(&kwargs), ["UniqueValidator"]);
        let unique = kwargs.validators.unwrap()[0].as_unique().cloned().unwrap();
        assert_eq!(unique.queryset, ModelRef::new("shop", "Product").default_manager());
    }

    #[test]
    fn test_unique_without_model_is_skipped() {
        let field = FieldDef::new("sku", FieldType::CharField).unique();
        assert!(get_field_kwargs("sku", &field).validators.is_none());
    }

    fn relation_meta() -> ModelMeta {
        ModelMeta::new(
            "blog",
            "Post",
            vec![
                FieldDef::new(
                    "author",
                    FieldType::ForeignKey {
                        to: "auth.User".into(),
                        on_delete: OnDelete::Cascade,
                        related_name: None,
                    },
                )
                .nullable(),
                FieldDef::new(
                    "tags",
                    FieldType::ManyToManyField {
                        to: "Tag".into(),
                        through: None,
                        related_name: None,
                    },
                )
                .help_text(
                    "Topics. Hold down \"Control\", or \"Command\" on a Mac, to select more than one.",
                ),
                FieldDef::new(
                    "editors",
                    FieldType::ManyToManyField {
                        to: "auth.User".into(),
                        through: Some("blog.Editorship".into()),
                        related_name: None,
                    },
                ),
                FieldDef::new(
                    "origin",
                    FieldType::OneToOneField {
                        to: "Post".into(),
                        on_delete: OnDelete::SetNull,
                        related_name: None,
                    },
                )
                .unique()
                .not_editable(),
            ],
        )
    }

    #[test]
    fn test_relation_foreign_key() {
        let meta = relation_meta();
        let info = RelationInfo::forward(meta.get_field("author").unwrap()).unwrap();
        let kwargs = get_relation_kwargs("author", &info);
        assert_eq!(
            kwargs.keys(),
            ["queryset", "view_name", "required", "allow_null"]
        );
        assert_eq!(kwargs.view_name.as_deref(), Some("user-detail"));
        assert_eq!(kwargs.queryset.unwrap().to_string(), "User.objects");
    }

    #[test]
    fn test_relation_many_to_many() {
        let meta = relation_meta();
        let info = RelationInfo::forward(meta.get_field("tags").unwrap()).unwrap();
        let kwargs = get_relation_kwargs("tags", &info);
        assert_eq!(kwargs.many, Some(true));
        assert_eq!(kwargs.help_text.as_deref(), Some("Topics."));
        assert_eq!(kwargs.view_name.as_deref(), Some("tag-detail"));
        assert!(kwargs.queryset.is_some());
    }

    #[test]
    fn test_relation_through_model_is_read_only() {
        let meta = relation_meta();
        let info = RelationInfo::forward(meta.get_field("editors").unwrap()).unwrap();
        let kwargs = get_relation_kwargs("editors", &info);
        assert_eq!(kwargs.keys(), ["view_name", "many", "read_only"]);
    }

    #[test]
    fn test_relation_non_editable_is_read_only() {
        let meta = relation_meta();
        let info = RelationInfo::forward(meta.get_field("origin").unwrap()).unwrap();
        let kwargs = get_relation_kwargs("origin", &info);
        assert_eq!(kwargs.keys(), ["view_name", "read_only"]);
        assert!(kwargs.validators.is_none());
    }

    #[test]
    fn test_relation_unique_appends_validator() {
        let meta = ModelMeta::new(
            "accounts",
            "Profile",
            vec![FieldDef::new(
                "user",
                FieldType::OneToOneField {
                    to: "auth.User".into(),
                    on_delete: OnDelete::Cascade,
                    related_name: None,
                },
            )
            .unique()
            .validator(Arc::new(MinValueValidator::new(1.0)))],
        );
        let info = RelationInfo::forward(&meta.fields[0]).unwrap();
        let kwargs = get_relation_kwargs("user", &info);
        assert_eq!(
            validator_names(&kwargs),
            ["MinValueValidator", "UniqueValidator"]
        );
        let unique = kwargs.validators.unwrap()[1].as_unique().cloned().unwrap();
        assert_eq!(unique.queryset.model, ModelRef::new("accounts", "Profile"));
    }

    #[test]
    fn test_reverse_relation() {
        let info = RelationInfo::reverse(ModelRef::new("blog", "Comment"), true);
        let kwargs = get_relation_kwargs("comments", &info);
        assert_eq!(kwargs.keys(), ["queryset", "view_name", "many"]);
    }

    #[test]
    fn test_nested_relation_kwargs() {
        let to_one = RelationInfo::reverse(ModelRef::new("blog", "Post"), false);
        assert_eq!(get_nested_relation_kwargs(&to_one).keys(), ["read_only"]);
        let to_many = RelationInfo::reverse(ModelRef::new("blog", "Post"), true);
        assert_eq!(
            get_nested_relation_kwargs(&to_many).keys(),
            ["many", "read_only"]
        );
    }

    #[test]
    fn test_url_kwargs() {
        let kwargs = get_url_kwargs(&ModelRef::new("shop", "OrderLine"));
        assert_eq!(kwargs.keys(), ["view_name"]);
        assert_eq!(kwargs.view_name.as_deref(), Some("orderline-detail"));
    }
}
