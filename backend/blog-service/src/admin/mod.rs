/// Back-office configuration and the validated write path
///
/// [`AdminRegistry`] describes how each entity is listed and edited;
/// [`AdminService`] applies the same rules when records are written
/// (seeding, data fixes), so integrity does not depend on the UI.
pub mod service;

pub use service::{normalize_tag_title, AdminService};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Post,
    Tag,
    Comment,
}

impl Entity {
    pub fn name(&self) -> &'static str {
        match self {
            Entity::Post => "post",
            Entity::Tag => "tag",
            Entity::Comment => "comment",
        }
    }

    pub fn verbose_name_plural(&self) -> &'static str {
        match self {
            Entity::Post => "posts",
            Entity::Tag => "tags",
            Entity::Comment => "comments",
        }
    }
}

/// Restriction applied to the selectable values of a relation field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceFilter {
    StaffOnly,
}

/// List / edit behaviour of one entity
#[derive(Debug, Clone, Serialize)]
pub struct ModelAdmin {
    pub entity: Entity,
    /// Columns of the list view; `__str__` means the record's display label
    pub list_display: Vec<&'static str>,
    /// Foreign keys edited with an id picker instead of a dropdown
    pub raw_id_fields: Vec<&'static str>,
    pub limit_choices_to: Vec<(&'static str, ChoiceFilter)>,
}

impl ModelAdmin {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            list_display: vec!["__str__"],
            raw_id_fields: Vec::new(),
            limit_choices_to: Vec::new(),
        }
    }

    pub fn list_display(mut self, fields: &[&'static str]) -> Self {
        self.list_display = fields.to_vec();
        self
    }

    pub fn raw_id_fields(mut self, fields: &[&'static str]) -> Self {
        self.raw_id_fields = fields.to_vec();
        self
    }

    pub fn limit_choices(mut self, field: &'static str, filter: ChoiceFilter) -> Self {
        self.limit_choices_to.push((field, filter));
        self
    }

    pub fn choice_filter(&self, field: &str) -> Option<ChoiceFilter> {
        self.limit_choices_to
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, filter)| *filter)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminRegistry {
    models: Vec<ModelAdmin>,
}

impl AdminRegistry {
    /// Registrations for the blog entities
    pub fn blog() -> Self {
        Self {
            models: vec![
                ModelAdmin::new(Entity::Post)
                    .raw_id_fields(&["author"])
                    .limit_choices("author", ChoiceFilter::StaffOnly),
                ModelAdmin::new(Entity::Tag),
                ModelAdmin::new(Entity::Comment)
                    .list_display(&["text", "author", "post"])
                    .raw_id_fields(&["post", "author"]),
            ],
        }
    }

    pub fn get(&self, entity: Entity) -> Option<&ModelAdmin> {
        self.models.iter().find(|model| model.entity == entity)
    }

    pub fn models(&self) -> &[ModelAdmin] {
        &self.models
    }
}

impl Default for AdminRegistry {
    fn default() -> Self {
        Self::blog()
    }
}
