use crate::core::draft::Draft;
use crate::core::entity::AdminEntity;
use crate::core::schema::{DraftMode, Resource};
use crate::entities::customer::CustomerSummary;
use crate::entities::status::{PaymentMethod, PaymentStatus};
use crate::view::{Listable, SortKind, SortValue};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A payment made by a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub payment_date: DateTime<Utc>,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub transaction_id: String,
    pub customer_id: i64,
    #[serde(default)]
    pub customer: Option<CustomerSummary>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AdminEntity for Payment {
    const RESOURCE: Resource = Resource::Payment;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.transaction_id.clone()
    }

    fn to_draft(&self) -> Draft {
        Draft::new(Resource::Payment, DraftMode::Edit)
            .with("payment_date", self.payment_date.format("%Y-%m-%d").to_string())
            .with("amount", self.amount.to_string())
            .with("payment_method", self.payment_method.as_str())
            .with("payment_status", self.payment_status.as_str())
            .with("transaction_id", &self.transaction_id)
            .with("customer_id", self.customer_id.to_string())
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Listable for Payment {
    const SORT_KEYS: &'static [(&'static str, SortKind)] = &[
        ("date", SortKind::Date),
        ("amount", SortKind::Number),
        ("status", SortKind::Text),
        ("method", SortKind::Text),
    ];
    const FILTER_KEYS: &'static [&'static str] = &["status", "method", "customer_id"];

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.transaction_id.as_str()),
            Cow::Owned(self.amount.to_string()),
        ]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.payment_status.as_str().to_string()),
            "method" => Some(self.payment_method.as_str().to_string()),
            "customer_id" => Some(self.customer_id.to_string()),
            _ => None,
        }
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "date" => Some(SortValue::Date(self.payment_date)),
            "amount" => Some(SortValue::Number(self.amount)),
            "status" => Some(SortValue::text(self.payment_status.as_str())),
            "method" => Some(SortValue::text(self.payment_method.as_str())),
            _ => None,
        }
    }
}
