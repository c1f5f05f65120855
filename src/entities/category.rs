use crate::core::draft::Draft;
use crate::core::entity::AdminEntity;
use crate::core::schema::{DraftMode, Resource};
use crate::view::{Listable, SortKind, SortValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AdminEntity for Category {
    const RESOURCE: Resource = Resource::Category;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn to_draft(&self) -> Draft {
        Draft::new(Resource::Category, DraftMode::Edit)
            .with("name", &self.name)
            .with("description", self.description.as_deref().unwrap_or_default())
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Listable for Category {
    const SORT_KEYS: &'static [(&'static str, SortKind)] =
        &[("name", SortKind::Text), ("date", SortKind::Date)];
    const FILTER_KEYS: &'static [&'static str] = &[];

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![Cow::Borrowed(self.name.as_str())];
        fields.extend(self.description.as_deref().map(Cow::Borrowed));
        fields
    }

    fn filter_value(&self, _key: &str) -> Option<String> {
        None
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "date" => self.created_at.map(SortValue::Date),
            _ => None,
        }
    }
}
