//! Keyword arguments for serializer field constructors.
//!
//! [`FieldKwargs`] is the typed equivalent of the `**kwargs` dictionary a
//! serializer field is constructed with. Every argument is optional; an
//! argument is "present" when its slot is `Some`. The mapping rules in
//! [`field_mapping`](crate::field_mapping) only ever fill in arguments the
//! target field class accepts.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use django_rs_db::fields::FieldDef;
use django_rs_db::model::ManagerRef;
use django_rs_db::value::Value;

use crate::validators::FieldValidator;

/// Rendering hints for a serializer field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldStyle {
    /// The template used to render the field in browsable forms.
    pub base_template: String,
    /// The `type` attribute of `input.html` fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
}

impl FieldStyle {
    /// A style rendering the field with the given template.
    pub fn template(name: impl Into<String>) -> Self {
        Self {
            base_template: name.into(),
            input_type: None,
        }
    }

    /// Sets the input type.
    #[must_use]
    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }
}

macro_rules! field_kwargs {
    ($($(#[$doc:meta])* $name:ident: $ty:ty,)*) => {
        /// Constructor arguments for a serializer field.
        #[derive(Debug, Clone, Default)]
        pub struct FieldKwargs<'a> {
            $($(#[$doc])* pub $name: Option<$ty>,)*
        }

        impl FieldKwargs<'_> {
            /// Every argument name, in canonical order.
            pub const ALL_KEYS: &'static [&'static str] = &[$(stringify!($name)),*];

            /// Returns the names of the present arguments, in canonical order.
            pub fn keys(&self) -> Vec<&'static str> {
                let mut keys = Vec::new();
                $(if self.$name.is_some() {
                    keys.push(stringify!($name));
                })*
                keys
            }

            /// Removes the named argument, returning `true` if it was present.
            pub fn remove(&mut self, key: &str) -> bool {
                match key {
                    $(stringify!($name) => self.$name.take().is_some(),)*
                    _ => false,
                }
            }
        }
    };
}

field_kwargs! {
    /// The model field itself, only consumed by `ModelField`.
    model_field: &'a FieldDef,
    /// The query set related objects are looked up in.
    queryset: ManagerRef,
    /// The view name hyperlinks are reversed with.
    view_name: String,
    /// Whether the field holds a list of values.
    many: bool,
    /// Human-readable label.
    label: String,
    /// Help text.
    help_text: String,
    /// Decimal precision.
    max_digits: u32,
    /// Decimal scale.
    decimal_places: u32,
    /// Rendering hints.
    style: FieldStyle,
    /// Whether the field is output only.
    read_only: bool,
    /// Whether input must include the field.
    required: bool,
    /// Whether `null` is accepted.
    allow_null: bool,
    /// Whether the empty string is accepted.
    allow_blank: bool,
    /// Allowed `(value, label)` pairs.
    choices: Vec<(Value, String)>,
    /// Maximum string length.
    max_length: usize,
    /// Minimum string length.
    min_length: usize,
    /// Maximum numeric value.
    max_value: f64,
    /// Minimum numeric value.
    min_value: f64,
    /// Additional validators.
    validators: Vec<FieldValidator>,
}

impl FieldKwargs<'_> {
    /// Returns `true` if the named argument is present.
    pub fn contains(&self, key: &str) -> bool {
        self.keys().contains(&key)
    }

    /// Removes every argument not listed in `allowed`.
    pub fn retain_keys(&mut self, allowed: &[&str]) {
        for key in self.keys() {
            if !allowed.contains(&key) {
                self.remove(key);
            }
        }
    }

    /// Returns `true` if no argument is present.
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Returns the number of present arguments.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    /// Returns `true` if `read_only` is present and set.
    pub fn is_read_only(&self) -> bool {
        self.read_only == Some(true)
    }

    /// Renders the present arguments as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        // Keys keep canonical order. Serialization cannot fail for this type.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for FieldKwargs<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        if let Some(field) = self.model_field {
            map.serialize_entry("model_field", field.name)?;
        }
        if let Some(queryset) = &self.queryset {
            map.serialize_entry("queryset", &queryset.to_string())?;
        }
        if let Some(view_name) = &self.view_name {
            map.serialize_entry("view_name", view_name)?;
        }
        if let Some(many) = self.many {
            map.serialize_entry("many", &many)?;
        }
        if let Some(label) = &self.label {
            map.serialize_entry("label", label)?;
        }
        if let Some(help_text) = &self.help_text {
            map.serialize_entry("help_text", help_text)?;
        }
        if let Some(max_digits) = self.max_digits {
            map.serialize_entry("max_digits", &max_digits)?;
        }
        if let Some(decimal_places) = self.decimal_places {
            map.serialize_entry("decimal_places", &decimal_places)?;
        }
        if let Some(style) = &self.style {
            map.serialize_entry("style", style)?;
        }
        if let Some(read_only) = self.read_only {
            map.serialize_entry("read_only", &read_only)?;
        }
        if let Some(required) = self.required {
            map.serialize_entry("required", &required)?;
        }
        if let Some(allow_null) = self.allow_null {
            map.serialize_entry("allow_null", &allow_null)?;
        }
        if let Some(allow_blank) = self.allow_blank {
            map.serialize_entry("allow_blank", &allow_blank)?;
        }
        if let Some(choices) = &self.choices {
            map.serialize_entry("choices", choices)?;
        }
        if let Some(max_length) = self.max_length {
            map.serialize_entry("max_length", &max_length)?;
        }
        if let Some(min_length) = self.min_length {
            map.serialize_entry("min_length", &min_length)?;
        }
        if let Some(max_value) = self.max_value {
            map.serialize_entry("max_value", &Limit(max_value))?;
        }
        if let Some(min_value) = self.min_value {
            map.serialize_entry("min_value", &Limit(min_value))?;
        }
        if let Some(validators) = &self.validators {
            let names: Vec<&str> = validators.iter().map(FieldValidator::name).collect();
            map.serialize_entry("validators", &names)?;
        }
        map.end()
    }
}

/// A numeric bound, written as an integer when it is a whole number.
struct Limit(f64);

impl Serialize for Limit {
    #[allow(clippy::cast_possible_truncation)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        const I64_RANGE: f64 = 9_223_372_036_854_775_808.0;
        let value = self.0;
        if value.fract() == 0.0 && (-I64_RANGE..I64_RANGE).contains(&value) {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}
