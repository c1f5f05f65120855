use crate::core::draft::Draft;
use crate::core::entity::AdminEntity;
use crate::core::schema::{DraftMode, Resource};
use crate::view::{Listable, SortKind, SortValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A customer of the platform (served as `costumer` by the API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// Customer fields embedded in order and payment responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
}

impl CustomerSummary {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last).trim().to_string()
}

impl AdminEntity for Customer {
    const RESOURCE: Resource = Resource::Customer;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.full_name()
    }

    fn to_draft(&self) -> Draft {
        Draft::new(Resource::Customer, DraftMode::Edit)
            .with("first_name", &self.first_name)
            .with("last_name", &self.last_name)
            .with("username", &self.username)
            .with("email", &self.email)
            .with("phone_number", self.phone_number.as_deref().unwrap_or_default())
            .with("address", self.address.as_deref().unwrap_or_default())
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Listable for Customer {
    const SORT_KEYS: &'static [(&'static str, SortKind)] = &[
        ("name", SortKind::Text),
        ("username", SortKind::Text),
        ("email", SortKind::Text),
        ("date", SortKind::Date),
    ];
    const FILTER_KEYS: &'static [&'static str] = &[];

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Borrowed(self.first_name.as_str()),
            Cow::Borrowed(self.last_name.as_str()),
            Cow::Borrowed(self.username.as_str()),
            Cow::Borrowed(self.email.as_str()),
        ];
        fields.extend(self.phone_number.as_deref().map(Cow::Borrowed));
        fields
    }

    fn filter_value(&self, _key: &str) -> Option<String> {
        None
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(self.full_name())),
            "username" => Some(SortValue::text(&self.username)),
            "email" => Some(SortValue::text(&self.email)),
            "date" => self.created_at.map(SortValue::Date),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_name_trims_missing_parts() {
        let summary = CustomerSummary {
            first_name: "Ada".into(),
            ..Default::default()
        };
        assert_eq!(summary.full_name(), "Ada");
    }

    #[test]
    fn test_decode_and_draft() {
        let customer = Customer::from_api(json!({
            "id": "12",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "username": "ada",
            "email": "ada@example.org",
        }))
        .unwrap();
        assert_eq!(customer.id, 12);
        assert_eq!(customer.display_name(), "Ada Lovelace");
        assert!(customer.to_draft().is_submittable());
    }
}
