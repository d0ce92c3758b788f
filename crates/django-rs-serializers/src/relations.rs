//! Relation descriptors.
//!
//! A [`RelationInfo`] describes one side of a relationship as seen from the
//! serializer of a model: the model field that declares it (absent for
//! reverse relations), the model on the other side, and whether the relation
//! is to-many or goes through an explicit intermediate model.

use django_rs_db::fields::{FieldDef, FieldType};
use django_rs_db::model::ModelRef;

/// The help text suffix old Django versions appended to many-to-many fields.
const MANYTOMANY_HELPTEXT_SUFFIX: &str =
    " Hold down \"Control\", or \"Command\" on a Mac, to select more than one.";

/// Describes a relationship from a serializer's point of view.
#[derive(Debug, Clone)]
pub struct RelationInfo<'a> {
    /// The model field declaring the relation, or `None` for reverse relations.
    pub model_field: Option<&'a FieldDef>,
    /// The model on the other side of the relation.
    pub related_model: ModelRef,
    /// Whether the relation yields many objects.
    pub to_many: bool,
    /// Whether the relation goes through an explicit intermediate model.
    pub has_through_model: bool,
    /// Whether this is a reverse relation.
    pub reverse: bool,
}

impl<'a> RelationInfo<'a> {
    /// Derives the relation declared by `field`.
    ///
    /// Returns `None` for non-relational fields. A target label without an
    /// application prefix resolves against the field's own model, and
    /// `"self"` names the field's own model.
    pub fn forward(field: &'a FieldDef) -> Option<Self> {
        let (to, to_many, has_through_model) = match &field.field_type {
            FieldType::ForeignKey { to, .. } | FieldType::OneToOneField { to, .. } => {
                (to, false, false)
            }
            FieldType::ManyToManyField { to, through, .. } => (to, true, through.is_some()),
            _ => return None,
        };
        Some(Self {
            model_field: Some(field),
            related_model: resolve_related_model(field, to),
            to_many,
            has_through_model,
            reverse: false,
        })
    }

    /// Describes a reverse relation pointing back at `related_model`.
    pub const fn reverse(related_model: ModelRef, to_many: bool) -> Self {
        Self {
            model_field: None,
            related_model,
            to_many,
            has_through_model: false,
            reverse: true,
        }
    }
}

fn resolve_related_model(field: &FieldDef, to: &str) -> ModelRef {
    if let Some(model) = ModelRef::parse(to) {
        return model;
    }
    let app_label = field
        .model
        .as_ref()
        .map(|m| m.app_label.clone())
        .unwrap_or_default();
    if to == "self" {
        if let Some(model) = &field.model {
            return model.clone();
        }
    }
    ModelRef::new(app_label, to)
}

/// Strips the legacy "Hold down Control" hint from many-to-many help text.
pub fn clean_manytomany_helptext(text: &str) -> &str {
    text.strip_suffix(MANYTOMANY_HELPTEXT_SUFFIX).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use django_rs_db::fields::OnDelete;
    use django_rs_db::model::ModelMeta;

    fn fk(name: &'static str, to: &str) -> FieldDef {
        FieldDef::new(
            name,
            FieldType::ForeignKey {
                to: to.to_string(),
                on_delete: OnDelete::Cascade,
                related_name: None,
            },
        )
    }

    #[test]
    fn test_forward_foreign_key() {
        let field = fk("author", "auth.User");
        let info = RelationInfo::forward(&field).unwrap();
        assert_eq!(info.related_model, ModelRef::new("auth", "User"));
        assert!(!info.to_many);
        assert!(!info.has_through_model);
        assert!(!info.reverse);
        assert_eq!(info.model_field.unwrap().name, "author");
    }

    #[test]
    fn test_clone_borrows_same_field() {
        let field = fk("author", "auth.User");
        let info = RelationInfo::forward(&field).unwrap();
        let copy = info.clone();
        assert!(std::ptr::eq(copy.model_field.unwrap(), &field));
        assert_eq!(copy.related_model, info.related_model);
    }

    #[test]
    fn test_forward_many_to_many_through() {
        let field = FieldDef::new(
            "members",
            FieldType::ManyToManyField {
                to: "auth.User".into(),
                through: Some("teams.Membership".into()),
                related_name: None,
            },
        );
        let info = RelationInfo::forward(&field).unwrap();
        assert!(info.to_many);
        assert!(info.has_through_model);
    }

    #[test]
    fn test_forward_relative_label_uses_own_app() {
        let meta = ModelMeta::new("blog", "Comment", vec![fk("post", "Post")]);
        let info = RelationInfo::forward(meta.get_field("post").unwrap()).unwrap();
        assert_eq!(info.related_model, ModelRef::new("blog", "Post"));
    }

    #[test]
    fn test_forward_self_reference() {
        let meta = ModelMeta::new("org", "Employee", vec![fk("manager", "self")]);
        let info = RelationInfo::forward(meta.get_field("manager").unwrap()).unwrap();
        assert_eq!(info.related_model, ModelRef::new("org", "Employee"));
    }

    #[test]
    fn test_forward_non_relation() {
        let field = FieldDef::new("title", FieldType::CharField);
        assert!(RelationInfo::forward(&field).is_none());
    }

    #[test]
    fn test_reverse() {
        let info = RelationInfo::reverse(ModelRef::new("blog", "Comment"), true);
        assert!(info.model_field.is_none());
        assert!(info.reverse);
        assert!(info.to_many);
    }

    #[test]
    fn test_clean_manytomany_helptext() {
        let text = "Tags for this post. Hold down \"Control\", or \"Command\" on a Mac, to select more than one.";
        assert_eq!(clean_manytomany_helptext(text), "Tags for this post.");
        assert_eq!(clean_manytomany_helptext("Plain help."), "Plain help.");
        assert_eq!(clean_manytomany_helptext(""), "");
    }
}
