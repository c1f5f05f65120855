use crate::core::draft::Draft;
use crate::core::entity::AdminEntity;
use crate::core::schema::{DraftMode, Resource};
use crate::view::{Listable, SortKind, SortValue};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A product listed by a business
///
/// `business_id` is fixed at creation; edit drafts never resubmit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: Decimal,
    pub quantity: i64,
    pub category_id: i64,
    pub business_id: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

impl AdminEntity for Product {
    const RESOURCE: Resource = Resource::Product;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn to_draft(&self) -> Draft {
        Draft::new(Resource::Product, DraftMode::Edit)
            .with("name", &self.name)
            .with("description", &self.description)
            .with("image", self.image.as_deref().unwrap_or_default())
            .with("price", self.price.to_string())
            .with("quantity", self.quantity.to_string())
            .with("category_id", self.category_id.to_string())
            .with("business_id", self.business_id.to_string())
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Listable for Product {
    const SORT_KEYS: &'static [(&'static str, SortKind)] = &[
        ("name", SortKind::Text),
        ("price", SortKind::Number),
        ("quantity", SortKind::Number),
        ("date", SortKind::Date),
    ];
    const FILTER_KEYS: &'static [&'static str] = &["category_id", "business_id"];

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.description.as_str()),
        ]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "category_id" => Some(self.category_id.to_string()),
            "business_id" => Some(self.business_id.to_string()),
            _ => None,
        }
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "price" => Some(SortValue::Number(self.price)),
            "quantity" => Some(SortValue::Number(Decimal::from(self.quantity))),
            "date" => self.created_at.map(SortValue::Date),
            _ => None,
        }
    }
}
