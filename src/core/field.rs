//! Field kinds and text format validators

use crate::core::schema::Resource;
use regex::Regex;
use std::sync::OnceLock;

/// Primitive type of a draft field
///
/// Every draft field is entered as text; the kind decides how that text is
/// validated and how it is normalized before transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Email address (always required)
    Email,
    /// Phone number, internal whitespace is ignored
    Phone,
    /// Absolute `http://` or `https://` URL
    Url,
    /// Decimal amount that must be strictly positive
    Decimal,
    /// Whole number with an inclusive lower bound
    Integer { min: i64 },
    /// One of a closed set of wire names
    Enum(&'static [&'static str]),
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// Identifier of another resource
    Reference(Resource),
}

impl FieldKind {
    /// Text format enforced for this kind, if any
    pub fn format(&self) -> Option<FieldFormat> {
        match self {
            FieldKind::Email => Some(FieldFormat::Email),
            FieldKind::Phone => Some(FieldFormat::Phone),
            FieldKind::Url => Some(FieldFormat::Url),
            _ => None,
        }
    }
}

/// Text formats checked with a regular expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Email,
    Phone,
    Url,
}

impl FieldFormat {
    /// Validate a raw text value against this format
    pub fn validate(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => Self::is_valid_email(value),
            FieldFormat::Phone => Self::is_valid_phone(value),
            FieldFormat::Url => Self::is_valid_url(value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email regex"));
        regex.is_match(email)
    }

    fn is_valid_url(url: &str) -> bool {
        static URL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"^https?://.+").expect("url regex"));
        regex.is_match(url)
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX.get_or_init(|| {
            // Optional '+', a non-zero digit, then at most 15 more digits
            Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone regex")
        });
        regex.is_match(&strip_whitespace(phone))
    }
}

/// Remove every whitespace character, including interior ones
pub fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}
