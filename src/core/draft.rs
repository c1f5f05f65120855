//! Drafts: in-progress, not-yet-persisted copies of an entity
//!
//! A draft holds every editable field as the text the user typed. Numeric and
//! date fields are only converted when [`Draft::to_payload`] builds the JSON
//! body for the API, after validation has passed.

use crate::core::error::ValidationErrors;
use crate::core::schema::{DraftMode, FieldDefault, Resource, order_item_key};
use crate::core::validation::{self, filters};
use chrono::{Local, NaiveDate};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// One line of an order draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemDraft {
    pub product_id: String,
    pub quantity: String,
}

impl OrderItemDraft {
    pub fn new(product_id: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            quantity: quantity.into(),
        }
    }

    /// An item with no product selected and a quantity of one
    pub fn blank() -> Self {
        Self::new("", "1")
    }
}

/// Text-valued working copy of one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    resource: Resource,
    mode: DraftMode,
    fields: IndexMap<&'static str, String>,
    items: Vec<OrderItemDraft>,
}

impl Draft {
    /// Blank draft with creation defaults applied against today's local date
    pub fn new(resource: Resource, mode: DraftMode) -> Self {
        Self::new_on(resource, mode, Local::now().date_naive())
    }

    /// Blank draft with creation defaults applied against `today`
    ///
    /// Defaults only apply in create mode; edit drafts start empty and are
    /// populated from the fetched entity.
    pub fn new_on(resource: Resource, mode: DraftMode, today: NaiveDate) -> Self {
        let fields = resource
            .schema()
            .fields
            .iter()
            .map(|spec| {
                let initial = match (mode, spec.default) {
                    (DraftMode::Create, FieldDefault::Today) => today.format("%Y-%m-%d").to_string(),
                    (DraftMode::Create, FieldDefault::Value(value)) => value.to_string(),
                    _ => String::new(),
                };
                (spec.name, initial)
            })
            .collect();

        Self {
            resource,
            mode,
            fields,
            items: Vec::new(),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn mode(&self) -> DraftMode {
        self.mode
    }

    /// Current text of a field, empty for unknown fields
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Replace the text of a field
    ///
    /// Returns `false` and leaves the draft untouched when the resource has no
    /// such field.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        match self.fields.get_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => {
                tracing::warn!(resource = %self.resource, field, "Ignoring unknown draft field");
                false
            }
        }
    }

    /// Builder form of [`Draft::set`]
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Field names and values, in schema order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn items(&self) -> &[OrderItemDraft] {
        &self.items
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut OrderItemDraft> {
        self.items.get_mut(index)
    }

    pub fn push_item(&mut self, item: OrderItemDraft) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, index: usize) -> Option<OrderItemDraft> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Builder form of [`Draft::push_item`]
    pub fn with_item(mut self, product_id: impl Into<String>, quantity: impl Into<String>) -> Self {
        self.items.push(OrderItemDraft::new(product_id, quantity));
        self
    }

    pub fn validate(&self) -> ValidationErrors {
        validation::validate(self)
    }

    /// A draft is submittable iff it has no validation errors
    pub fn is_submittable(&self) -> bool {
        self.validate().is_empty()
    }

    /// Build the JSON body sent to the API
    ///
    /// Validation runs first. Text is trimmed, phone numbers lose their
    /// whitespace, decimals become decimal strings, quantities and references
    /// become integers and dates become ISO-8601 timestamps. In edit mode,
    /// fields that are fixed after creation are left out.
    pub fn to_payload(&self) -> Result<Value, ValidationErrors> {
        self.validate().into_result()?;

        let schema = self.resource.schema();
        let mut errors = ValidationErrors::new();
        let mut payload = Map::new();

        for spec in schema.fields_for(self.mode) {
            match filters::normalize_field(spec, self.get(spec.name)) {
                Ok(value) => {
                    payload.insert(spec.wire.to_string(), value);
                }
                Err(e) => errors.insert(spec.name, e.to_string()),
            }
        }

        if schema.has_items {
            let mut items = Vec::with_capacity(self.items.len());
            for (index, item) in self.items.iter().enumerate() {
                let product_id = filters::integer()("product_id", Value::from(item.product_id.as_str()));
                let quantity = filters::integer()("quantity", Value::from(item.quantity.as_str()));
                match (product_id, quantity) {
                    (Ok(product_id), Ok(quantity)) => {
                        let mut entry = Map::new();
                        entry.insert("product_id".to_string(), product_id);
                        entry.insert("quantity".to_string(), quantity);
                        items.push(Value::Object(entry));
                    }
                    (product_id, quantity) => {
                        if let Err(e) = product_id {
                            errors.insert(order_item_key(index, "product_id"), e.to_string());
                        }
                        if let Err(e) = quantity {
                            errors.insert(order_item_key(index, "quantity"), e.to_string());
                        }
                    }
                }
            }
            payload.insert("order_items".to_string(), Value::Array(items));
        }

        errors.into_result()?;
        Ok(Value::Object(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_payment_create_defaults() {
        let draft = Draft::new_on(Resource::Payment, DraftMode::Create, day());
        assert_eq!(draft.get("payment_date"), "2024-03-09");
        assert_eq!(draft.get("payment_status"), "PENDING");
        assert_eq!(draft.get("amount"), "");
    }

    #[test]
    fn test_edit_drafts_start_without_defaults() {
        let draft = Draft::new_on(Resource::Payment, DraftMode::Edit, day());
        assert_eq!(draft.get("payment_date"), "");
        assert_eq!(draft.get("payment_status"), "");
    }

    #[test]
    fn test_set_unknown_field_is_rejected() {
        let mut draft = Draft::new(Resource::Category, DraftMode::Create);
        assert!(!draft.set("price", "10"));
        assert!(draft.set("name", "Tools"));
        assert_eq!(draft.get("name"), "Tools");
        assert_eq!(draft.get("price"), "");
    }

    #[test]
    fn test_product_payload_normalizes_numbers() {
        let draft = Draft::new(Resource::Product, DraftMode::Create)
            .with("name", "  Widget ")
            .with("description", "A widget")
            .with("price", "12.50")
            .with("quantity", "3")
            .with("category_id", "1")
            .with("business_id", "2");

        let payload = draft.to_payload().unwrap();
        assert_eq!(
            payload,
            json!({
                "name": "Widget",
                "description": "A widget",
                "image": null,
                "price": "12.50",
                "quantity": 3,
                "category_id": 1,
                "business_id": 2,
            })
        );
    }

    #[test]
    fn test_product_update_payload_omits_business() {
        let draft = Draft::new(Resource::Product, DraftMode::Edit)
            .with("name", "Widget")
            .with("description", "A widget")
            .with("price", "12.50")
            .with("quantity", "0")
            .with("category_id", "1")
            .with("business_id", "2");

        let payload = draft.to_payload().unwrap();
        assert!(payload.get("business_id").is_none());
        assert_eq!(payload["quantity"], json!(0));
    }

    #[test]
    fn test_order_payload_uses_costumer_id_and_integer_items() {
        let draft = Draft::new(Resource::Order, DraftMode::Create)
            .with("customer_id", "5")
            .with_item("7", "2")
            .with_item("8", "1");

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload["costumer_id"], json!(5));
        assert_eq!(payload["order_status"], json!("PENDING"));
        assert_eq!(
            payload["order_items"],
            json!([{"product_id": 7, "quantity": 2}, {"product_id": 8, "quantity": 1}])
        );
    }

    #[test]
    fn test_payment_payload_timestamp_and_amount() {
        let draft = Draft::new_on(Resource::Payment, DraftMode::Create, day())
            .with("amount", "10.00")
            .with("payment_method", "PAYPAL")
            .with("transaction_id", "TX-001")
            .with("customer_id", "3");

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload["payment_date"], json!("2024-03-09T00:00:00.000Z"));
        assert_eq!(payload["amount"], json!("10.00"));
        assert_eq!(payload["customer_id"], json!(3));
    }

    #[test]
    fn test_business_phone_is_stripped() {
        let draft = Draft::new(Resource::Business, DraftMode::Create)
            .with("name", "Acme")
            .with("email", "hello@acme.io")
            .with("username", "acme")
            .with("phone_number", "555 123 4567");

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload["phone_number"], json!("5551234567"));
        assert_eq!(payload["website"], Value::Null);
    }

    #[test]
    fn test_invalid_draft_has_no_payload() {
        let draft = Draft::new(Resource::Category, DraftMode::Create);
        let errors = draft.to_payload().unwrap_err();
        assert!(errors.contains("name"));
    }

    #[test]
    fn test_remove_item_out_of_range() {
        let mut draft = Draft::new(Resource::Order, DraftMode::Create).with_item("1", "1");
        assert!(draft.remove_item(3).is_none());
        assert_eq!(draft.remove_item(0), Some(OrderItemDraft::new("1", "1")));
        assert!(draft.items().is_empty());
    }
}
