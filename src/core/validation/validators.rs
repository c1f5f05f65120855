//! Reusable field validators
//!
//! Each factory returns a closure taking the field label and the raw text.
//! Emptiness is handled by the caller; these only judge non-empty input,
//! except [`required_text`] and [`min_length`].

use crate::core::field::FieldFormat;
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Validator: trimmed text must not be empty
pub fn required_text() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |label: &str, value: &str| {
        if value.trim().is_empty() {
            Err(format!("{} is required", label))
        } else {
            Ok(())
        }
    }
}

/// Validator: trimmed text must have at least `min` characters
pub fn min_length(min: usize) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |label: &str, value: &str| {
        if value.trim().chars().count() < min {
            Err(format!(
                "{} is required and must be at least {} characters long",
                label, min
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: `non-whitespace@non-whitespace.non-whitespace`
pub fn email() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &str| {
        if FieldFormat::Email.validate(value) {
            Ok(())
        } else {
            Err("Please enter a valid email address".to_string())
        }
    }
}

/// Validator: optional '+', then 1 to 16 digits not starting with 0
pub fn phone() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &str| {
        if FieldFormat::Phone.validate(value) {
            Ok(())
        } else {
            Err("Please enter a valid phone number".to_string())
        }
    }
}

/// Validator: must start with `http://` or `https://`
pub fn url() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |label: &str, value: &str| {
        if FieldFormat::Url.validate(value.trim()) {
            Ok(())
        } else {
            Err(format!(
                "Please enter a valid {} URL starting with http:// or https://",
                label.to_lowercase()
            ))
        }
    }
}

/// Validator: decimal strictly greater than zero
pub fn positive_decimal() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |label: &str, value: &str| match Decimal::from_str(value.trim()) {
        Ok(amount) if amount > Decimal::ZERO => Ok(()),
        _ => Err(format!("Valid {} is required", label.to_lowercase())),
    }
}

/// Validator: whole number no smaller than `min`
pub fn integer_at_least(min: i64) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |label: &str, value: &str| match value.trim().parse::<i64>() {
        Ok(n) if n >= min => Ok(()),
        _ => Err(format!("Valid {} is required", label.to_lowercase())),
    }
}

/// Validator: selected identifier must be a valid integer
pub fn reference() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |label: &str, value: &str| match value.trim().parse::<i64>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!("Valid {} is required", label.to_lowercase())),
    }
}

/// Validator: value must be one of the allowed wire names
pub fn one_of(
    allowed: &'static [&'static str],
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |label: &str, value: &str| {
        if allowed.contains(&value.trim()) {
            Ok(())
        } else {
            Err(format!("{} must be one of: {}", label, allowed.join(", ")))
        }
    }
}

/// Validator: calendar date `YYYY-MM-DD`, or a full RFC 3339 timestamp
pub fn date() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |label: &str, value: &str| {
        let value = value.trim();
        let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
            || DateTime::parse_from_rfc3339(value).is_ok();
        if parsed {
            Ok(())
        } else {
            Err(format!("{} must be a valid date (YYYY-MM-DD)", label))
        }
    }
}
