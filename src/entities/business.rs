use crate::core::draft::Draft;
use crate::core::entity::AdminEntity;
use crate::core::schema::{DraftMode, Resource};
use crate::view::{Listable, SortKind, SortValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A merchant selling through the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AdminEntity for Business {
    const RESOURCE: Resource = Resource::Business;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn to_draft(&self) -> Draft {
        Draft::new(Resource::Business, DraftMode::Edit)
            .with("name", &self.name)
            .with("email", &self.email)
            .with("username", &self.username)
            .with("address", self.address.as_deref().unwrap_or_default())
            .with("logo", self.logo.as_deref().unwrap_or_default())
            .with("website", self.website.as_deref().unwrap_or_default())
            .with("phone_number", self.phone_number.as_deref().unwrap_or_default())
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Listable for Business {
    const SORT_KEYS: &'static [(&'static str, SortKind)] = &[
        ("name", SortKind::Text),
        ("username", SortKind::Text),
        ("email", SortKind::Text),
        ("date", SortKind::Date),
    ];
    const FILTER_KEYS: &'static [&'static str] = &[];

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.username.as_str()),
            Cow::Borrowed(self.email.as_str()),
        ];
        fields.extend(self.address.as_deref().map(Cow::Borrowed));
        fields
    }

    fn filter_value(&self, _key: &str) -> Option<String> {
        None
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "username" => Some(SortValue::text(&self.username)),
            "email" => Some(SortValue::text(&self.email)),
            "date" => self.created_at.map(SortValue::Date),
            _ => None,
        }
    }
}
