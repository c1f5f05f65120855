//! Reusable field filters
//!
//! These filters normalize draft text into the JSON values sent to the API.
//! They run after validation, so a failure here means the draft changed
//! under the caller or the validator and the filter disagree.

use crate::core::field::{FieldKind, strip_whitespace as strip};
use crate::core::schema::FieldSpec;
use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: remove all whitespace, including interior
pub fn strip_whitespace() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(strip(s)))
        } else {
            Ok(value)
        }
    }
}

/// Filter: empty string becomes null
pub fn empty_as_null() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value.as_str() {
        Some("") => Ok(Value::Null),
        _ => Ok(value),
    }
}

/// Filter: parse a decimal and re-emit it as a decimal string
pub fn decimal_string() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| {
        let Some(s) = value.as_str() else {
            return Ok(value);
        };
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| anyhow!("'{}' is not a decimal ({}): {}", field, s, e))?;
        Ok(Value::String(amount.to_string()))
    }
}

/// Filter: parse a whole number
pub fn integer() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| {
        let Some(s) = value.as_str() else {
            return Ok(value);
        };
        let n: i64 = s
            .trim()
            .parse()
            .map_err(|e| anyhow!("'{}' is not an integer ({}): {}", field, s, e))?;
        Ok(Value::from(n))
    }
}

/// Filter: date or timestamp to an ISO-8601 UTC timestamp with milliseconds
pub fn iso_timestamp() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| {
        let Some(s) = value.as_str() else {
            return Ok(value);
        };
        let s = s.trim();
        let instant = if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            date.and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc())
                .ok_or_else(|| anyhow!("'{}' has no midnight: {}", field, s))?
        } else {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| anyhow!("'{}' is not a date ({}): {}", field, s, e))?
        };
        Ok(Value::String(
            instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        ))
    }
}

/// Normalize one draft field according to its kind
pub fn normalize_field(spec: &FieldSpec, raw: &str) -> Result<Value> {
    let field = spec.name;
    let value = trim()(field, Value::from(raw))?;

    match spec.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Url | FieldKind::Enum(_) => {
            if spec.required {
                Ok(value)
            } else {
                empty_as_null()(field, value)
            }
        }
        FieldKind::Phone => empty_as_null()(field, strip_whitespace()(field, value)?),
        FieldKind::Decimal => decimal_string()(field, value),
        FieldKind::Integer { .. } | FieldKind::Reference(_) => integer()(field, value),
        FieldKind::Date => iso_timestamp()(field, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Resource;
    use serde_json::json;

    // === trim() ===

    #[test]
    fn test_trim_removes_whitespace() {
        let f = trim();
        let result = f("name", json!("  hello  ")).expect("should not fail");
        assert_eq!(result, json!("hello"));
    }

    #[test]
    fn test_trim_non_string_passthrough() {
        let f = trim();
        let result = f("age", json!(42)).expect("should not fail");
        assert_eq!(result, json!(42));
    }

    // === strip_whitespace() ===

    #[test]
    fn test_strip_whitespace_interior() {
        let f = strip_whitespace();
        let result = f("phone_number", json!("555 123 4567")).expect("should not fail");
        assert_eq!(result, json!("5551234567"));
    }

    // === empty_as_null() ===

    #[test]
    fn test_empty_as_null() {
        let f = empty_as_null();
        assert_eq!(f("logo", json!("")).unwrap(), Value::Null);
        assert_eq!(f("logo", json!("x")).unwrap(), json!("x"));
    }

    // === decimal_string() ===

    #[test]
    fn test_decimal_string_keeps_scale() {
        let f = decimal_string();
        assert_eq!(f("amount", json!("10.00")).unwrap(), json!("10.00"));
        assert_eq!(f("amount", json!(" 7 ")).unwrap(), json!("7"));
    }

    #[test]
    fn test_decimal_string_rejects_garbage() {
        let f = decimal_string();
        let err = f("amount", json!("ten")).unwrap_err();
        assert!(err.to_string().contains("amount"));
    }

    // === integer() ===

    #[test]
    fn test_integer() {
        let f = integer();
        assert_eq!(f("quantity", json!("3")).unwrap(), json!(3));
        assert!(f("quantity", json!("3.5")).is_err());
    }

    // === iso_timestamp() ===

    #[test]
    fn test_iso_timestamp_from_date() {
        let f = iso_timestamp();
        assert_eq!(
            f("payment_date", json!("2024-01-01")).unwrap(),
            json!("2024-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_iso_timestamp_from_offset_timestamp() {
        let f = iso_timestamp();
        assert_eq!(
            f("payment_date", json!("2024-01-01T12:30:00+02:00")).unwrap(),
            json!("2024-01-01T10:30:00.000Z")
        );
    }

    // === normalize_field() ===

    #[test]
    fn test_normalize_optional_text_to_null() {
        let spec = Resource::Category.schema().field("description").unwrap();
        assert_eq!(normalize_field(spec, "   ").unwrap(), Value::Null);
    }

    #[test]
    fn test_normalize_reference() {
        let spec = Resource::Product.schema().field("category_id").unwrap();
        assert_eq!(normalize_field(spec, " 4 ").unwrap(), json!(4));
    }
}
