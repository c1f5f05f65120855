//! Display formatting helpers
//!
//! Everything here is derived for display only; formatted values are never
//! stored or sent back to the API.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Placeholder shown for missing values
pub const MISSING: &str = "N/A";

/// `1234.5` → `$1,234.50`
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let mut rounded = rounded.abs();
    rounded.rescale(2);
    let text = rounded.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{}${}.{}", sign, group_thousands(whole), fraction)
}

/// Like [`format_price`] for a raw decimal string; unparseable input is zero
pub fn format_price_str(amount: &str) -> String {
    format_price(Decimal::from_str(amount.trim()).unwrap_or(Decimal::ZERO))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `Jan 1, 2024`, or `N/A`
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => MISSING.to_string(),
    }
}

/// `Jan 1, 2024, 09:30 AM`, or `N/A`
pub fn format_date_time(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => MISSING.to_string(),
    }
}

/// Cut `text` to `max_len` characters, appending `...` when shortened
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_len).collect();
    out.push_str("...");
    out
}

/// `ORD-` followed by the last eight digits of the epoch milliseconds
pub fn generate_order_number(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().to_string();
    let start = millis.len().saturating_sub(8);
    format!("ORD-{}", &millis[start..])
}
