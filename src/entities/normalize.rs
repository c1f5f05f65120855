//! Normalization boundary between raw API responses and canonical entities
//!
//! The backend is inconsistent about naming: keys arrive in camelCase or
//! snake_case, foreign keys arrive as `*_id` fields or as embedded objects,
//! the customer resource is spelled `costumer`, and timestamps come as ISO
//! strings with or without an offset, as dates, or as component arrays.
//! [`canonicalize`] maps every known variant onto the one shape the entity
//! structs deserialize from. Nothing past this module branches on variants.

use crate::core::schema::Resource;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value};

const TIMESTAMP_FIELDS: [&str; 2] = ["created_at", "updated_at"];

/// Map a raw API response for `resource` onto its canonical JSON shape
///
/// Non-object values are returned unchanged and fail later at decoding.
pub fn canonicalize(resource: Resource, value: Value) -> Value {
    let Value::Object(raw) = value else {
        return value;
    };
    let mut map = snake_keys(raw);

    integer_field(&mut map, "id");
    for field in TIMESTAMP_FIELDS {
        optional_timestamp(&mut map, field);
    }

    match resource {
        Resource::Business | Resource::Category | Resource::Customer => {}
        Resource::Product => {
            resolve_reference(&mut map, "category_id", &["category"]);
            resolve_reference(&mut map, "business_id", &["business"]);
            embedded_name(&mut map, "category", "category_name");
            embedded_name(&mut map, "business", "business_name");
            integer_field(&mut map, "quantity");
        }
        Resource::Order => {
            resolve_reference(&mut map, "customer_id", &["costumer_id"]);
            resolve_reference(&mut map, "customer_id", &["costumer", "customer"]);
            customer_summary(&mut map);
            order_items(&mut map);
        }
        Resource::Payment => {
            resolve_reference(&mut map, "customer_id", &["costumer_id"]);
            resolve_reference(&mut map, "customer_id", &["costumer", "customer"]);
            customer_summary(&mut map);
            if let Some(date) = map.get("payment_date").and_then(timestamp) {
                map.insert("payment_date".to_string(), Value::String(date));
            }
        }
    }

    Value::Object(map)
}

/// `phoneNumber` → `phone_number`
pub fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert top-level keys to snake_case; an existing snake_case key wins
fn snake_keys(raw: Map<String, Value>) -> Map<String, Value> {
    let mut map = Map::with_capacity(raw.len());
    let mut converted = Vec::new();

    for (key, value) in raw {
        let snake = snake_case(&key);
        if snake == key {
            map.insert(key, value);
        } else {
            converted.push((snake, value));
        }
    }
    for (key, value) in converted {
        map.entry(key).or_insert(value);
    }
    map
}

/// Integer from a JSON number or a numeric string
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integer_field(map: &mut Map<String, Value>, field: &str) {
    if let Some(n) = map.get(field).and_then(as_integer) {
        map.insert(field.to_string(), Value::from(n));
    }
}

/// Fill `target` from the first alias holding an id, either directly or as
/// the `id` of an embedded object
fn resolve_reference(map: &mut Map<String, Value>, target: &str, aliases: &[&str]) {
    if let Some(id) = map.get(target).and_then(as_integer) {
        map.insert(target.to_string(), Value::from(id));
        return;
    }

    let found = aliases.iter().find_map(|alias| match map.get(*alias)? {
        Value::Object(embedded) => embedded.get("id").and_then(as_integer),
        other => as_integer(other),
    });
    if let Some(id) = found {
        map.insert(target.to_string(), Value::from(id));
    }
}

fn embedded_name(map: &mut Map<String, Value>, embedded: &str, target: &str) {
    if map.contains_key(target) {
        return;
    }
    let name = map
        .get(embedded)
        .and_then(Value::as_object)
        .and_then(|object| object.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string);
    if let Some(name) = name {
        map.insert(target.to_string(), Value::String(name));
    }
}

/// Canonical `customer` summary from an embedded `costumer` or `customer`
fn customer_summary(map: &mut Map<String, Value>) {
    let embedded = ["costumer", "customer"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_object).cloned());
    map.remove("costumer");

    match embedded {
        Some(object) => {
            let mut summary = snake_keys(object);
            integer_field(&mut summary, "id");
            map.insert("customer".to_string(), Value::Object(summary));
        }
        None => {
            map.remove("customer");
        }
    }
}

fn order_items(map: &mut Map<String, Value>) {
    let Some(Value::Array(items)) = map.remove("order_items") else {
        map.insert("order_items".to_string(), Value::Array(Vec::new()));
        return;
    };

    let items = items
        .into_iter()
        .map(|item| match item {
            Value::Object(raw) => {
                let mut item = snake_keys(raw);
                integer_field(&mut item, "id");
                resolve_reference(&mut item, "product_id", &["product"]);
                integer_field(&mut item, "quantity");
                Value::Object(item)
            }
            other => other,
        })
        .collect();
    map.insert("order_items".to_string(), Value::Array(items));
}

/// Unparseable optional timestamps are dropped rather than failing the entity
fn optional_timestamp(map: &mut Map<String, Value>, field: &str) {
    let Some(value) = map.get(field) else {
        return;
    };
    let canonical = timestamp(value).map(Value::String).unwrap_or(Value::Null);
    map.insert(field.to_string(), canonical);
}

/// RFC 3339 form of any accepted timestamp representation
pub fn timestamp(value: &Value) -> Option<String> {
    parse_timestamp(value).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        // Epoch milliseconds
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        // [year, month, day, hour?, minute?, second?, nanos?]
        Value::Array(parts) => {
            let parts: Vec<i64> = parts.iter().map(Value::as_i64).collect::<Option<_>>()?;
            let part = |i: usize| parts.get(i).copied().unwrap_or(0);
            let date = NaiveDate::from_ymd_opt(
                i32::try_from(part(0)).ok()?,
                u32::try_from(part(1)).ok()?,
                u32::try_from(part(2)).ok()?,
            )?;
            let time = date.and_hms_nano_opt(
                u32::try_from(part(3)).ok()?,
                u32::try_from(part(4)).ok()?,
                u32::try_from(part(5)).ok()?,
                u32::try_from(part(6)).ok()?,
            )?;
            Some(time.and_utc())
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Offset-less timestamps are taken as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("phoneNumber"), "phone_number");
        assert_eq!(snake_case("createdAt"), "created_at");
        assert_eq!(snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_snake_key_wins_over_camel_duplicate() {
        let value = canonicalize(
            Resource::Business,
            json!({"id": 1, "phone_number": "111", "phoneNumber": "222"}),
        );
        assert_eq!(value["phone_number"], json!("111"));
        assert!(value.get("phoneNumber").is_none());
    }

    #[test]
    fn test_product_references_from_embedded_objects() {
        let value = canonicalize(
            Resource::Product,
            json!({
                "id": "9",
                "name": "Lamp",
                "price": 12.5,
                "quantity": "4",
                "category": {"id": 3, "name": "Lighting"},
                "business": {"id": "2", "name": "Acme"},
            }),
        );
        assert_eq!(value["id"], json!(9));
        assert_eq!(value["category_id"], json!(3));
        assert_eq!(value["business_id"], json!(2));
        assert_eq!(value["category_name"], json!("Lighting"));
        assert_eq!(value["business_name"], json!("Acme"));
        assert_eq!(value["quantity"], json!(4));
    }

    #[test]
    fn test_product_camel_case_references() {
        let value = canonicalize(
            Resource::Product,
            json!({"id": 1, "categoryId": 5, "businessId": 6}),
        );
        assert_eq!(value["category_id"], json!(5));
        assert_eq!(value["business_id"], json!(6));
    }

    #[test]
    fn test_order_customer_variants() {
        for raw in [
            json!({"id": 1, "costumer_id": 7}),
            json!({"id": 1, "costumerId": 7}),
            json!({"id": 1, "costumer": {"id": 7, "firstName": "Ada"}}),
            json!({"id": 1, "customer": {"id": "7"}}),
            json!({"id": 1, "customer_id": "7"}),
        ] {
            let value = canonicalize(Resource::Order, raw.clone());
            assert_eq!(value["customer_id"], json!(7), "variant {}", raw);
        }
    }

    #[test]
    fn test_order_embedded_customer_becomes_summary() {
        let value = canonicalize(
            Resource::Order,
            json!({
                "id": 1,
                "costumer": {"id": 7, "first_name": "Ada", "lastName": "Lovelace"},
                "orderItems": [{"product": {"id": 4}, "quantity": "2"}],
            }),
        );
        assert_eq!(value["customer"]["first_name"], json!("Ada"));
        assert_eq!(value["customer"]["last_name"], json!("Lovelace"));
        assert!(value.get("costumer").is_none());
        assert_eq!(value["order_items"], json!([{"product": {"id": 4}, "product_id": 4, "quantity": 2}]));
    }

    #[test]
    fn test_order_without_items_gets_empty_list() {
        let value = canonicalize(Resource::Order, json!({"id": 1, "costumer_id": 2}));
        assert_eq!(value["order_items"], json!([]));
    }

    #[test]
    fn test_payment_customer_and_date() {
        let value = canonicalize(
            Resource::Payment,
            json!({
                "id": 3,
                "paymentDate": "2024-01-01T10:00:00",
                "costumerId": 8,
                "amount": "10.00",
            }),
        );
        assert_eq!(value["customer_id"], json!(8));
        assert_eq!(value["payment_date"], json!("2024-01-01T10:00:00.000Z"));
    }

    #[test]
    fn test_timestamp_variants() {
        assert_eq!(
            timestamp(&json!("2024-01-01T10:00:00+02:00")).as_deref(),
            Some("2024-01-01T08:00:00.000Z")
        );
        assert_eq!(
            timestamp(&json!("2024-01-01")).as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
        assert_eq!(
            timestamp(&json!([2024, 1, 1, 9, 30])).as_deref(),
            Some("2024-01-01T09:30:00.000Z")
        );
        assert_eq!(
            timestamp(&json!(1704067200000_i64)).as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
        assert_eq!(timestamp(&json!("yesterday")), None);
    }

    #[test]
    fn test_bad_optional_timestamp_is_dropped() {
        let value = canonicalize(
            Resource::Category,
            json!({"id": 1, "name": "Tools", "createdAt": "soon"}),
        );
        assert_eq!(value["created_at"], Value::Null);
    }

    #[test]
    fn test_non_object_passes_through() {
        assert_eq!(canonicalize(Resource::Category, json!([1, 2])), json!([1, 2]));
    }
}
