//! Model descriptors for the ORM.
//!
//! [`ModelMeta`] is the equivalent of a Django model's `_meta`: the
//! application label, the class name and the field definitions. [`ModelRef`]
//! is a lightweight handle naming a model, used wherever only the identity of
//! a model is needed (relation targets, query sets, view names).

use std::fmt;

use django_rs_core::utils::text::camel_case_to_spaces;

use crate::fields::FieldDef;

/// Identifies a model by application label and class name.
///
/// # Examples
///
/// ```
/// use django_rs_db::model::ModelRef;
///
/// let user = ModelRef::parse("auth.User").unwrap();
/// assert_eq!(user.app_label, "auth");
/// assert_eq!(user.model_name(), "user");
/// assert_eq!(user.label(), "auth.User");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ModelRef {
    /// The application label (e.g. "auth", "blog").
    pub app_label: String,
    /// The model class name (e.g. "User", "BlogPost").
    pub object_name: String,
}

impl ModelRef {
    /// Creates a reference from an application label and a class name.
    pub fn new(app_label: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            object_name: object_name.into(),
        }
    }

    /// Parses an `"app_label.ObjectName"` label.
    ///
    /// Returns `None` unless the label has exactly two non-empty parts.
    pub fn parse(label: &str) -> Option<Self> {
        let (app_label, object_name) = label.split_once('.')?;
        if app_label.is_empty() || object_name.is_empty() || object_name.contains('.') {
            return None;
        }
        Some(Self::new(app_label, object_name))
    }

    /// The lowercased class name, as used in view names and permissions.
    pub fn model_name(&self) -> String {
        self.object_name.to_lowercase()
    }

    /// The `"app_label.ObjectName"` label.
    pub fn label(&self) -> String {
        format!("{}.{}", self.app_label, self.object_name)
    }

    /// Returns a reference to this model's default manager.
    pub fn default_manager(&self) -> ManagerRef {
        ManagerRef {
            model: self.clone(),
            name: "objects".to_string(),
        }
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_label, self.object_name)
    }
}

/// A reference to a model manager, the source of a model's query sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ManagerRef {
    /// The managed model.
    pub model: ModelRef,
    /// The manager's attribute name (e.g. "objects").
    pub name: String,
}

impl fmt::Display for ManagerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.model.object_name, self.name)
    }
}

/// Metadata about a model, equivalent to Django's `_meta`.
///
/// # Examples
///
/// ```
/// use django_rs_db::fields::{FieldDef, FieldType};
/// use django_rs_db::model::ModelMeta;
///
/// let meta = ModelMeta::new(
///     "blog",
///     "BlogPost",
///     vec![FieldDef::new("title", FieldType::CharField).max_length(200)],
/// );
/// assert_eq!(meta.verbose_name, "blog post");
/// assert_eq!(meta.get_field("title").unwrap().model.as_ref(), Some(&meta.model_ref()));
/// ```
#[derive(Debug, Clone)]
pub struct ModelMeta {
    /// The application label (e.g. "auth", "blog").
    pub app_label: String,
    /// The model class name (e.g. "BlogPost").
    pub object_name: String,
    /// Human-readable singular name.
    pub verbose_name: String,
    /// Field definitions, in declaration order.
    pub fields: Vec<FieldDef>,
}

impl ModelMeta {
    /// Creates model metadata and attaches every field to the model.
    pub fn new(
        app_label: impl Into<String>,
        object_name: impl Into<String>,
        fields: Vec<FieldDef>,
    ) -> Self {
        let app_label = app_label.into();
        let object_name = object_name.into();
        let model = ModelRef::new(app_label.clone(), object_name.clone());
        let fields = fields
            .into_iter()
            .map(|mut field| {
                field.model = Some(model.clone());
                field
            })
            .collect();
        Self {
            verbose_name: camel_case_to_spaces(&object_name),
            app_label,
            object_name,
            fields,
        }
    }

    /// Sets the verbose name.
    #[must_use]
    pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
        self.verbose_name = name.into();
        self
    }

    /// Returns a reference naming this model.
    pub fn model_ref(&self) -> ModelRef {
        ModelRef::new(self.app_label.clone(), self.object_name.clone())
    }

    /// The lowercased class name.
    pub fn model_name(&self) -> String {
        self.object_name.to_lowercase()
    }

    /// Returns the field with the given name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the primary key field, if one is declared.
    pub fn pk_field(&self) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.primary_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldType;

    fn article_meta() -> ModelMeta {
        ModelMeta::new(
            "blog",
            "Article",
            vec![
                FieldDef::new("id", FieldType::BigAutoField).primary_key(),
                FieldDef::new("title", FieldType::CharField).max_length(100),
            ],
        )
    }

    #[test]
    fn test_model_meta() {
        let meta = article_meta();
        assert_eq!(meta.app_label, "blog");
        assert_eq!(meta.object_name, "Article");
        assert_eq!(meta.model_name(), "article");
        assert_eq!(meta.verbose_name, "article");
        assert_eq!(meta.fields.len(), 2);
    }

    #[test]
    fn test_fields_attached_to_model() {
        let meta = article_meta();
        for field in &meta.fields {
            assert_eq!(field.model.as_ref(), Some(&meta.model_ref()));
        }
    }

    #[test]
    fn test_get_field_and_pk() {
        let meta = article_meta();
        assert!(meta.get_field("title").is_some());
        assert!(meta.get_field("missing").is_none());
        assert_eq!(meta.pk_field().unwrap().name, "id");
    }

    #[test]
    fn test_verbose_name_override() {
        let meta = article_meta().verbose_name("news item");
        assert_eq!(meta.verbose_name, "news item");
    }

    #[test]
    fn test_model_ref_parse() {
        let m = ModelRef::parse("shop.OrderLine").unwrap();
        assert_eq!(m.app_label, "shop");
        assert_eq!(m.object_name, "OrderLine");
        assert_eq!(m.model_name(), "orderline");
        assert_eq!(m.to_string(), "shop.OrderLine");
    }

    #[test]
    fn test_model_ref_parse_invalid() {
        assert!(ModelRef::parse("User").is_none());
        assert!(ModelRef::parse(".User").is_none());
        assert!(ModelRef::parse("auth.").is_none());
        assert!(ModelRef::parse("a.b.C").is_none());
    }

    #[test]
    fn test_default_manager() {
        let manager = ModelRef::new("auth", "User").default_manager();
        assert_eq!(manager.name, "objects");
        assert_eq!(manager.model.label(), "auth.User");
        assert_eq!(manager.to_string(), "User.objects");
    }
}
