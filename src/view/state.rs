//! Immutable view state for list views

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction applied to a sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Named sort with an optional explicit direction
///
/// Parsed from `key`, `key:asc` or `key:desc`. Without a direction the key's
/// natural order applies: newest first for dates, ascending otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub key: String,
    pub direction: Option<SortDirection>,
}

impl SortKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: None,
        }
    }

    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Some(SortDirection::Asc),
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Some(SortDirection::Desc),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Some(direction) => write!(f, "{}:{}", self.key, direction.as_str()),
            None => f.write_str(&self.key),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (key, direction) = match s.split_once(':') {
            Some((key, dir)) => {
                let direction = match dir.trim().to_lowercase().as_str() {
                    "asc" => SortDirection::Asc,
                    "desc" => SortDirection::Desc,
                    other => return Err(format!("Invalid sort direction: {}", other)),
                };
                (key.trim(), Some(direction))
            }
            None => (s, None),
        };

        if key.is_empty() {
            return Err("Sort key cannot be empty".to_string());
        }

        Ok(Self {
            key: key.to_string(),
            direction,
        })
    }
}

/// Search term, categorical filters and sort for one list view
///
/// Every `with_*` method returns a new state; the list view holds the
/// current value and hands it to [`project`](super::project).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub search_term: String,
    pub filters: IndexMap<String, String>,
    pub sort: Option<SortKey>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(&self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..self.clone()
        }
    }

    /// Set a categorical filter; an empty value removes it
    pub fn with_filter(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let (key, value) = (key.into(), value.into());
        if value.trim().is_empty() {
            return self.without_filter(&key);
        }
        let mut next = self.clone();
        next.filters.insert(key, value);
        next
    }

    pub fn without_filter(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.filters.shift_remove(key);
        next
    }

    pub fn with_sort(&self, sort: SortKey) -> Self {
        Self {
            sort: Some(sort),
            ..self.clone()
        }
    }

    pub fn without_sort(&self) -> Self {
        Self {
            sort: None,
            ..self.clone()
        }
    }

    /// Filters with a non-blank value
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}
