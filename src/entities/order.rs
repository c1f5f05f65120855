use crate::core::draft::{Draft, OrderItemDraft};
use crate::core::entity::AdminEntity;
use crate::core::schema::{DraftMode, Resource};
use crate::entities::customer::CustomerSummary;
use crate::entities::status::OrderStatus;
use crate::view::{Listable, SortKind, SortValue};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One product line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub product_id: i64,
    pub quantity: i64,
}

/// A customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    #[serde(default)]
    pub customer: Option<CustomerSummary>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub order_status: OrderStatus,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Full name of the embedded customer, if the response carried one
    pub fn customer_name(&self) -> Option<String> {
        self.customer.as_ref().map(CustomerSummary::full_name)
    }

    pub fn item_count(&self) -> i64 {
        self.order_items.iter().map(|item| item.quantity).sum()
    }
}

impl AdminEntity for Order {
    const RESOURCE: Resource = Resource::Order;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        match &self.order_number {
            Some(number) => number.clone(),
            None => format!("Order #{}", self.id),
        }
    }

    fn to_draft(&self) -> Draft {
        let mut draft = Draft::new(Resource::Order, DraftMode::Edit)
            .with("customer_id", self.customer_id.to_string())
            .with("order_status", self.order_status.as_str());
        for item in &self.order_items {
            draft.push_item(OrderItemDraft::new(
                item.product_id.to_string(),
                item.quantity.to_string(),
            ));
        }
        draft
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Listable for Order {
    const SORT_KEYS: &'static [(&'static str, SortKind)] = &[
        ("date", SortKind::Date),
        ("amount", SortKind::Number),
        ("status", SortKind::Text),
        ("customer", SortKind::Text),
    ];
    const FILTER_KEYS: &'static [&'static str] = &["status", "customer_id"];

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields: Vec<Cow<'_, str>> =
            self.order_number.as_deref().map(Cow::Borrowed).into_iter().collect();
        if let Some(customer) = &self.customer {
            fields.push(Cow::Borrowed(customer.first_name.as_str()));
            fields.push(Cow::Borrowed(customer.last_name.as_str()));
            fields.push(Cow::Borrowed(customer.username.as_str()));
        }
        fields
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.order_status.as_str().to_string()),
            "customer_id" => Some(self.customer_id.to_string()),
            _ => None,
        }
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "date" => self.created_at.map(SortValue::Date),
            "amount" => self.total_amount.map(SortValue::Number),
            "status" => Some(SortValue::text(self.order_status.as_str())),
            "customer" => self.customer_name().map(SortValue::text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_order() -> serde_json::Value {
        json!({
            "id": 4,
            "orderNumber": "ORD-12345678",
            "costumer": {"id": 2, "first_name": "Ada", "last_name": "Lovelace", "username": "ada"},
            "orderItems": [
                {"id": 1, "product": {"id": 10}, "quantity": 2},
                {"id": 2, "product_id": "11", "quantity": "1"},
            ],
            "orderStatus": "SHIPPED",
            "totalAmount": "42.00",
        })
    }

    #[test]
    fn test_decode_embedded_customer_and_items() {
        let order = Order::from_api(raw_order()).unwrap();
        assert_eq!(order.customer_id, 2);
        assert_eq!(order.customer_name().as_deref(), Some("Ada Lovelace"));
        assert_eq!(order.order_items.len(), 2);
        assert_eq!(order.order_items[1].product_id, 11);
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.order_status, OrderStatus::Shipped);
    }

    #[test]
    fn test_missing_status_defaults_to_pending() {
        let order = Order::from_api(json!({"id": 1, "costumer_id": 3})).unwrap();
        assert_eq!(order.order_status, OrderStatus::Pending);
        assert_eq!(order.display_name(), "Order #1");
    }

    #[test]
    fn test_draft_keeps_item_order() {
        let draft = Order::from_api(raw_order()).unwrap().to_draft();
        let products: Vec<_> = draft.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(products, vec!["10", "11"]);
        assert_eq!(draft.get("order_status"), "SHIPPED");
        assert!(draft.is_submittable());
    }
}
