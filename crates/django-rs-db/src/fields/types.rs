//! Field type definitions for the ORM.
//!
//! Each [`FieldType`] variant corresponds to a Django model field class and
//! [`FieldDef`] captures all metadata about a single model field. The class
//! hierarchy of the Django field classes is exposed through [`FieldClass`],
//! so that tables keyed by field class can resolve subclasses the way Django
//! resolves them (an `EmailField` is a `CharField`, a `DateTimeField` is a
//! `DateField`).

use django_rs_core::utils::class_lookup::{ClassKey, Dispatch};

use crate::model::ModelRef;
use crate::validators::{
    validate_email, validate_slug, MaxLengthValidator, UrlValidator, ValidatorRef,
};
use crate::value::Value;

/// The type of a model field, determining its behavior.
///
/// Relational fields (`ForeignKey`, `OneToOneField`, `ManyToManyField`) carry
/// additional metadata about the relationship.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum FieldType {
    /// Auto-incrementing 32-bit integer primary key.
    AutoField,
    /// Auto-incrementing 64-bit integer primary key.
    BigAutoField,
    /// Variable-length string with a max length.
    CharField,
    /// Unlimited-length text.
    TextField,
    /// Email address (CharField with email validation).
    EmailField,
    /// URL (CharField with URL validation).
    UrlField,
    /// Slug (URL-friendly string).
    SlugField,
    /// 32-bit signed integer.
    IntegerField,
    /// 64-bit signed integer.
    BigIntegerField,
    /// 16-bit signed integer.
    SmallIntegerField,
    /// Non-negative 32-bit integer.
    PositiveIntegerField,
    /// Non-negative 16-bit integer.
    PositiveSmallIntegerField,
    /// 64-bit floating-point number.
    FloatField,
    /// Fixed-precision decimal number.
    DecimalField {
        /// Maximum total digits.
        max_digits: u32,
        /// Digits after the decimal point.
        decimal_places: u32,
    },
    /// Boolean (true/false).
    BooleanField,
    /// Boolean that also accepts NULL.
    NullBooleanField,
    /// Date without time.
    DateField,
    /// Date and time.
    DateTimeField,
    /// Time without date.
    TimeField,
    /// Duration / interval.
    DurationField,
    /// UUID field.
    UuidField,
    /// Raw binary data.
    BinaryField,
    /// JSON data.
    JsonField,
    /// IPv4 or IPv6 address.
    IpAddressField,
    /// File system path.
    FilePathField,
    /// Uploaded file.
    FileField,
    /// Uploaded image.
    ImageField,
    /// Many-to-one relationship.
    ForeignKey {
        /// The target model label (e.g. "auth.User").
        to: String,
        /// Behavior when the referenced object is deleted.
        on_delete: OnDelete,
        /// The name used for the reverse relation.
        related_name: Option<String>,
    },
    /// One-to-one relationship (unique foreign key).
    OneToOneField {
        /// The target model label.
        to: String,
        /// Behavior when the referenced object is deleted.
        on_delete: OnDelete,
        /// The name used for the reverse relation.
        related_name: Option<String>,
    },
    /// Many-to-many relationship (via intermediate table).
    ManyToManyField {
        /// The target model label.
        to: String,
        /// Optional explicit intermediate ("through") model.
        through: Option<String>,
        /// The name used for the reverse relation.
        related_name: Option<String>,
    },
}

/// Behavior when a referenced object is deleted (ON DELETE action).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OnDelete {
    /// Delete all related objects (CASCADE).
    Cascade,
    /// Prevent deletion if related objects exist (PROTECT).
    Protect,
    /// Set the foreign key to NULL.
    SetNull,
    /// Set the foreign key to its default value.
    SetDefault,
    /// Take no action (may cause integrity errors).
    DoNothing,
}

/// The Django model field classes, including the abstract bases `Field` and
/// `RelatedField`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    Field,
    AutoField,
    BigAutoField,
    CharField,
    TextField,
    EmailField,
    UrlField,
    SlugField,
    IntegerField,
    BigIntegerField,
    SmallIntegerField,
    PositiveIntegerField,
    PositiveSmallIntegerField,
    FloatField,
    DecimalField,
    BooleanField,
    NullBooleanField,
    DateField,
    DateTimeField,
    TimeField,
    DurationField,
    UuidField,
    BinaryField,
    JsonField,
    IpAddressField,
    FilePathField,
    FileField,
    ImageField,
    RelatedField,
    ForeignKey,
    OneToOneField,
    ManyToManyField,
}

impl ClassKey for FieldClass {
    fn mro(self) -> &'static [Self] {
        use FieldClass as C;
        match self {
            C::Field => &[C::Field],
            C::AutoField => &[C::AutoField, C::IntegerField, C::Field],
            C::BigAutoField => &[
                C::BigAutoField,
                C::AutoField,
                C::BigIntegerField,
                C::IntegerField,
                C::Field,
            ],
            C::CharField => &[C::CharField, C::Field],
            C::TextField => &[C::TextField, C::Field],
            C::EmailField => &[C::EmailField, C::CharField, C::Field],
            C::UrlField => &[C::UrlField, C::CharField, C::Field],
            C::SlugField => &[C::SlugField, C::CharField, C::Field],
            C::IntegerField => &[C::IntegerField, C::Field],
            C::BigIntegerField => &[C::BigIntegerField, C::IntegerField, C::Field],
            C::SmallIntegerField => &[C::SmallIntegerField, C::IntegerField, C::Field],
            C::PositiveIntegerField => &[C::PositiveIntegerField, C::IntegerField, C::Field],
            C::PositiveSmallIntegerField => &[
                C::PositiveSmallIntegerField,
                C::SmallIntegerField,
                C::IntegerField,
                C::Field,
            ],
            C::FloatField => &[C::FloatField, C::Field],
            C::DecimalField => &[C::DecimalField, C::Field],
            C::BooleanField => &[C::BooleanField, C::Field],
            C::NullBooleanField => &[C::NullBooleanField, C::BooleanField, C::Field],
            C::DateField => &[C::DateField, C::Field],
            C::DateTimeField => &[C::DateTimeField, C::DateField, C::Field],
            C::TimeField => &[C::TimeField, C::Field],
            C::DurationField => &[C::DurationField, C::Field],
            C::UuidField => &[C::UuidField, C::Field],
            C::BinaryField => &[C::BinaryField, C::Field],
            C::JsonField => &[C::JsonField, C::Field],
            C::IpAddressField => &[C::IpAddressField, C::Field],
            C::FilePathField => &[C::FilePathField, C::Field],
            C::FileField => &[C::FileField, C::Field],
            C::ImageField => &[C::ImageField, C::FileField, C::Field],
            C::RelatedField => &[C::RelatedField, C::Field],
            C::ForeignKey => &[C::ForeignKey, C::RelatedField, C::Field],
            C::OneToOneField => &[C::OneToOneField, C::ForeignKey, C::RelatedField, C::Field],
            C::ManyToManyField => &[C::ManyToManyField, C::RelatedField, C::Field],
        }
    }

    fn name(self) -> &'static str {
        use FieldClass as C;
        match self {
            C::Field => "Field",
            C::AutoField => "AutoField",
            C::BigAutoField => "BigAutoField",
            C::CharField => "CharField",
            C::TextField => "TextField",
            C::EmailField => "EmailField",
            C::UrlField => "URLField",
            C::SlugField => "SlugField",
            C::IntegerField => "IntegerField",
            C::BigIntegerField => "BigIntegerField",
            C::SmallIntegerField => "SmallIntegerField",
            C::PositiveIntegerField => "PositiveIntegerField",
            C::PositiveSmallIntegerField => "PositiveSmallIntegerField",
            C::FloatField => "FloatField",
            C::DecimalField => "DecimalField",
            C::BooleanField => "BooleanField",
            C::NullBooleanField => "NullBooleanField",
            C::DateField => "DateField",
            C::DateTimeField => "DateTimeField",
            C::TimeField => "TimeField",
            C::DurationField => "DurationField",
            C::UuidField => "UUIDField",
            C::BinaryField => "BinaryField",
            C::JsonField => "JSONField",
            C::IpAddressField => "GenericIPAddressField",
            C::FilePathField => "FilePathField",
            C::FileField => "FileField",
            C::ImageField => "ImageField",
            C::RelatedField => "RelatedField",
            C::ForeignKey => "ForeignKey",
            C::OneToOneField => "OneToOneField",
            C::ManyToManyField => "ManyToManyField",
        }
    }
}

impl FieldType {
    /// Returns the Django field class this type corresponds to.
    pub const fn class(&self) -> FieldClass {
        match self {
            Self::AutoField => FieldClass::AutoField,
            Self::BigAutoField => FieldClass::BigAutoField,
            Self::CharField => FieldClass::CharField,
            Self::TextField => FieldClass::TextField,
            Self::EmailField => FieldClass::EmailField,
            Self::UrlField => FieldClass::UrlField,
            Self::SlugField => FieldClass::SlugField,
            Self::IntegerField => FieldClass::IntegerField,
            Self::BigIntegerField => FieldClass::BigIntegerField,
            Self::SmallIntegerField => FieldClass::SmallIntegerField,
            Self::PositiveIntegerField => FieldClass::PositiveIntegerField,
            Self::PositiveSmallIntegerField => FieldClass::PositiveSmallIntegerField,
            Self::FloatField => FieldClass::FloatField,
            Self::DecimalField { .. } => FieldClass::DecimalField,
            Self::BooleanField => FieldClass::BooleanField,
            Self::NullBooleanField => FieldClass::NullBooleanField,
            Self::DateField => FieldClass::DateField,
            Self::DateTimeField => FieldClass::DateTimeField,
            Self::TimeField => FieldClass::TimeField,
            Self::DurationField => FieldClass::DurationField,
            Self::UuidField => FieldClass::UuidField,
            Self::BinaryField => FieldClass::BinaryField,
            Self::JsonField => FieldClass::JsonField,
            Self::IpAddressField => FieldClass::IpAddressField,
            Self::FilePathField => FieldClass::FilePathField,
            Self::FileField => FieldClass::FileField,
            Self::ImageField => FieldClass::ImageField,
            Self::ForeignKey { .. } => FieldClass::ForeignKey,
            Self::OneToOneField { .. } => FieldClass::OneToOneField,
            Self::ManyToManyField { .. } => FieldClass::ManyToManyField,
        }
    }

    /// The `max_length` Django gives this field type when none is specified.
    pub const fn default_max_length(&self) -> Option<usize> {
        match self {
            Self::EmailField => Some(254),
            Self::UrlField => Some(200),
            Self::SlugField => Some(50),
            Self::FilePathField | Self::FileField | Self::ImageField => Some(100),
            _ => None,
        }
    }

    /// Whether Django forces `null=True` on this field type.
    pub const fn forces_null(&self) -> bool {
        matches!(self, Self::NullBooleanField)
    }

    /// Whether Django forces `blank=True` on this field type.
    pub const fn forces_blank(&self) -> bool {
        matches!(self, Self::BooleanField | Self::NullBooleanField)
    }
}

/// A single entry of a field's `choices`: either a plain option or a named
/// group of options.
#[derive(Debug, Clone, PartialEq)]
pub enum Choice {
    /// A `(value, label)` pair.
    Option(Value, String),
    /// A labelled group of `(value, label)` pairs.
    Group(String, Vec<(Value, String)>),
}

/// Complete definition of a model field, including metadata and constraints.
///
/// Fields are usually created through [`FieldDef::new`] and the builder
/// methods, then handed to [`ModelMeta::new`](crate::model::ModelMeta::new),
/// which records the owning model on each field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// The attribute name of this field.
    pub name: &'static str,
    /// The type of this field.
    pub field_type: FieldType,
    /// Whether this field is the primary key.
    pub primary_key: bool,
    /// Whether NULL is allowed in the database.
    pub null: bool,
    /// Whether the field may be left blank in forms.
    pub blank: bool,
    /// Default value for new instances.
    pub default: Option<Value>,
    /// Whether a UNIQUE constraint is applied.
    pub unique: bool,
    /// Maximum character length (for CharField and similar).
    pub max_length: Option<usize>,
    /// Human-readable help text.
    pub help_text: String,
    /// Human-readable name for the field.
    pub verbose_name: String,
    /// Allowed values, possibly grouped.
    pub choices: Vec<Choice>,
    /// Validators passed explicitly, on top of the type's default validators.
    pub validators: Vec<ValidatorRef>,
    /// Whether the field is editable in forms and serializers.
    pub editable: bool,
    /// The model this field belongs to, once attached.
    pub model: Option<ModelRef>,
}

impl FieldDef {
    /// Creates a new `FieldDef` with sensible defaults.
    ///
    /// Only the field name and type are required. The verbose name is derived
    /// from the name and `max_length` takes the type's Django default.
    /// Boolean types are always blank, and `NullBooleanField` is always null.
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        let max_length = field_type.default_max_length();
        let null = field_type.forces_null();
        let blank = field_type.forces_blank();
        Self {
            name,
            field_type,
            primary_key: false,
            null,
            blank,
            default: None,
            unique: false,
            max_length,
            help_text: String::new(),
            verbose_name: name.replace('_', " "),
            choices: Vec::new(),
            validators: Vec::new(),
            editable: true,
            model: None,
        }
    }

    /// Marks this field as the primary key. Primary keys are unique.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.unique = true;
        self
    }

    /// Allows NULL values in the database.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.null = true;
        self
    }

    /// Allows the field to be left blank.
    #[must_use]
    pub const fn blank(mut self) -> Self {
        self.blank = true;
        self
    }

    /// Sets the maximum character length.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Marks this field as having a UNIQUE constraint.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the default value for this field.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the verbose (human-readable) name.
    #[must_use]
    pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
        self.verbose_name = name.into();
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets flat `(value, label)` choices.
    #[must_use]
    pub fn choices<V, L>(mut self, choices: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<Value>,
        L: Into<String>,
    {
        self.choices = choices
            .into_iter()
            .map(|(v, l)| Choice::Option(v.into(), l.into()))
            .collect();
        self
    }

    /// Appends a named group of choices.
    #[must_use]
    pub fn choice_group<V, L>(
        mut self,
        group: impl Into<String>,
        choices: impl IntoIterator<Item = (V, L)>,
    ) -> Self
    where
        V: Into<Value>,
        L: Into<String>,
    {
        let options = choices
            .into_iter()
            .map(|(v, l)| (v.into(), l.into()))
            .collect();
        self.choices.push(Choice::Group(group.into(), options));
        self
    }

    /// Adds an explicit validator.
    #[must_use]
    pub fn validator(mut self, validator: ValidatorRef) -> Self {
        self.validators.push(validator);
        self
    }

    /// Marks the field as not editable.
    #[must_use]
    pub const fn not_editable(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Equivalent of `auto_now=True` / `auto_now_add=True` on date fields:
    /// the value is set by the ORM, so the field is blank and not editable.
    #[must_use]
    pub const fn auto_now(mut self) -> Self {
        self.editable = false;
        self.blank = true;
        self
    }

    /// Returns the Django field class of this field.
    pub const fn class(&self) -> FieldClass {
        self.field_type.class()
    }

    /// Returns `true` if this field's class is `class` or a subclass of it.
    pub fn is_instance(&self, class: FieldClass) -> bool {
        self.class().is_subclass_of(class)
    }

    /// Returns `true` if a default value is set.
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Returns the choices with groups flattened, in declaration order.
    pub fn flatchoices(&self) -> Vec<(Value, String)> {
        let mut flat = Vec::new();
        for choice in &self.choices {
            match choice {
                Choice::Option(value, label) => flat.push((value.clone(), label.clone())),
                Choice::Group(_, options) => flat.extend(options.iter().cloned()),
            }
        }
        flat
    }

    /// Returns the decimal precision, for decimal fields.
    pub const fn max_digits(&self) -> Option<u32> {
        match self.field_type {
            FieldType::DecimalField { max_digits, .. } => Some(max_digits),
            _ => None,
        }
    }

    /// Returns the decimal scale, for decimal fields.
    pub const fn decimal_places(&self) -> Option<u32> {
        match self.field_type {
            FieldType::DecimalField { decimal_places, .. } => Some(decimal_places),
            _ => None,
        }
    }

    /// Returns the type's default validators followed by the explicit ones.
    ///
    /// Character fields with a `max_length` get a [`MaxLengthValidator`],
    /// email and slug fields the shared [`validate_email`] and
    /// [`validate_slug`] instances, and URL fields a [`UrlValidator`].
    pub fn all_validators(&self) -> Vec<ValidatorRef> {
        let mut validators: Vec<ValidatorRef> = Vec::new();
        match self.field_type {
            FieldType::EmailField => validators.push(validate_email()),
            FieldType::SlugField => validators.push(validate_slug()),
            FieldType::UrlField => validators.push(std::sync::Arc::new(UrlValidator::new())),
            _ => {}
        }
        if self.is_instance(FieldClass::CharField) {
            if let Some(max_length) = self.max_length {
                validators.push(std::sync::Arc::new(MaxLengthValidator::new(max_length)));
            }
        }
        validators.extend(self.validators.iter().cloned());
        validators
    }

    /// Returns `true` if this field represents a relational field.
    pub fn is_relation(&self) -> bool {
        self.is_instance(FieldClass::RelatedField)
    }
}

impl Dispatch for FieldDef {
    type Key = FieldClass;

    fn lookup_class(&self) -> FieldClass {
        self.class()
    }
}
