//! Default rendering styles for serializer fields.
//!
//! The browsable API renders every serializer field through an HTML template.
//! Which template a field uses by default depends on its class, resolved
//! through the class hierarchy so that, say, an `EmailField` picks up the
//! email input rather than the plain text input of its `CharField` parent.
//! A `style` argument passed to the field overrides the default.

use std::sync::OnceLock;

use django_rs_core::utils::class_lookup::{ClassLookup, Dispatch};
use django_rs_core::DjangoResult;

use crate::fields::{SerializerField, SerializerFieldClass};
use crate::kwargs::FieldStyle;

type StyleEntry = (&'static str, Option<&'static str>);

fn default_styles() -> &'static ClassLookup<SerializerFieldClass, StyleEntry> {
    static STYLES: OnceLock<ClassLookup<SerializerFieldClass, StyleEntry>> = OnceLock::new();
    STYLES.get_or_init(|| {
        use SerializerFieldClass as C;
        ClassLookup::new([
            (C::Field, ("input.html", Some("text"))),
            (C::EmailField, ("input.html", Some("email"))),
            (C::UrlField, ("input.html", Some("url"))),
            (C::IntegerField, ("input.html", Some("number"))),
            (C::FloatField, ("input.html", Some("number"))),
            (C::DecimalField, ("input.html", Some("number"))),
            (C::DateTimeField, ("input.html", Some("datetime-local"))),
            (C::DateField, ("input.html", Some("date"))),
            (C::TimeField, ("input.html", Some("time"))),
            (C::FileField, ("input.html", Some("file"))),
            (C::BooleanField, ("checkbox.html", None)),
            (C::ChoiceField, ("select.html", None)),
            (C::MultipleChoiceField, ("select_multiple.html", None)),
            (C::RelatedField, ("select.html", None)),
            (C::ManyRelatedField, ("select_multiple.html", None)),
            (C::Serializer, ("fieldset.html", None)),
            (C::JsonField, ("textarea.html", None)),
        ])
    })
}

/// Returns the default style for a serializer field or a bound field.
///
/// # Examples
///
/// ```
/// use django_rs_serializers::fields::{SerializerField, SerializerFieldClass};
/// use django_rs_serializers::kwargs::FieldKwargs;
/// use django_rs_serializers::style::default_style;
///
/// let field = SerializerField::new(SerializerFieldClass::SlugField, FieldKwargs::default());
/// let style = default_style(&field).unwrap();
/// assert_eq!(style.base_template, "input.html");
/// assert_eq!(style.input_type.as_deref(), Some("text"));
/// ```
pub fn default_style<D>(field: &D) -> DjangoResult<FieldStyle>
where
    D: Dispatch<Key = SerializerFieldClass> + ?Sized,
{
    let (template, input_type) = *default_styles().get(field)?;
    let style = FieldStyle::template(template);
    Ok(match input_type {
        Some(input_type) => style.input_type(input_type),
        None => style,
    })
}

/// Returns the style `field` renders with: its default style, overridden by
/// the field's `style` argument.
pub fn resolve_style(field: &SerializerField<'_>) -> DjangoResult<FieldStyle> {
    let mut style = default_style(field)?;
    if let Some(custom) = &field.kwargs.style {
        style.base_template.clone_from(&custom.base_template);
        if custom.input_type.is_some() {
            style.input_type.clone_from(&custom.input_type);
        }
    }
    Ok(style)
}
