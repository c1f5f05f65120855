//! Filter, search and sort projection over a fetched collection

use crate::core::entity::AdminEntity;
use crate::view::state::{SortDirection, ViewState};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::cell::OnceCell;
use std::cmp::Ordering;

/// How values of a sort key compare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Case-insensitive lexicographic
    Text,
    Number,
    /// Chronological, newest first unless overridden
    Date,
}

impl SortKind {
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortKind::Date => SortDirection::Desc,
            SortKind::Text | SortKind::Number => SortDirection::Asc,
        }
    }
}

/// Extracted value of one sort key
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(Decimal),
    Date(DateTime<Utc>),
}

impl SortValue {
    pub fn text(value: impl AsRef<str>) -> Self {
        SortValue::Text(value.as_ref().to_lowercase())
    }

    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Per-entity extractors used by the list views
pub trait Listable {
    /// Sort keys understood by this entity
    const SORT_KEYS: &'static [(&'static str, SortKind)];

    /// Categorical filter keys understood by this entity
    const FILTER_KEYS: &'static [&'static str];

    /// Attributes covered by the free-text search
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// Value compared exactly against a categorical filter
    fn filter_value(&self, key: &str) -> Option<String>;

    /// Value of a sort key, `None` when the item lacks it
    fn sort_value(&self, key: &str) -> Option<SortValue>;
}

/// Whether an item passes the search term and every active filter
///
/// An unknown filter key matches nothing.
pub fn matches<T: Listable>(item: &T, state: &ViewState) -> bool {
    let term = state.search_term.trim().to_lowercase();
    if !term.is_empty()
        && !item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    {
        return false;
    }

    state.active_filters().all(|(key, value)| {
        T::FILTER_KEYS.contains(&key)
            && item
                .filter_value(key)
                .is_some_and(|actual| actual == value.trim())
    })
}

/// Project a collection through a view state
///
/// Nothing is computed until the projection is first read.
pub fn project<'a, T: Listable>(source: &'a [T], state: &ViewState) -> Projection<'a, T> {
    Projection {
        source,
        state: state.clone(),
        order: OnceCell::new(),
    }
}

/// Lazy, restartable view over a borrowed collection
///
/// The source is never mutated. Iterating twice yields the same sequence.
pub struct Projection<'a, T> {
    source: &'a [T],
    state: ViewState,
    order: OnceCell<Vec<usize>>,
}

impl<'a, T: Listable> Projection<'a, T> {
    fn order(&self) -> &[usize] {
        self.order.get_or_init(|| compute_order(self.source, &self.state))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        let source = self.source;
        self.order().iter().map(move |&index| &source[index])
    }

    pub fn len(&self) -> usize {
        self.order().len()
    }

    pub fn is_empty(&self) -> bool {
        self.order().is_empty()
    }

    pub fn to_vec(&self) -> Vec<&'a T> {
        self.iter().collect()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }
}

impl<'a, T: Listable + AdminEntity> Projection<'a, T> {
    /// Identifiers in projected order
    pub fn ids(&self) -> Vec<i64> {
        self.iter().map(AdminEntity::id).collect()
    }
}

fn compute_order<T: Listable>(source: &[T], state: &ViewState) -> Vec<usize> {
    let selected = source
        .iter()
        .enumerate()
        .filter(|(_, item)| matches(*item, state))
        .map(|(index, _)| index);

    let Some(sort) = &state.sort else {
        return selected.collect();
    };
    let Some(&(_, kind)) = T::SORT_KEYS.iter().find(|(key, _)| *key == sort.key) else {
        tracing::debug!(sort = %sort, "Unknown sort key, keeping source order");
        return selected.collect();
    };
    let direction = sort.direction.unwrap_or(kind.default_direction());

    let mut keyed: Vec<(usize, Option<SortValue>)> = selected
        .map(|index| (index, source[index].sort_value(&sort.key)))
        .collect();

    // Stable; items without a value go last in either direction
    keyed.sort_by(|(_, a), (_, b)| match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.compare(b),
            SortDirection::Desc => b.compare(a),
        },
    });

    keyed.into_iter().map(|(index, _)| index).collect()
}
