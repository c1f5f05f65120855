//! Owned collection behind one list view

use crate::core::entity::AdminEntity;
use crate::view::projection::{Listable, Projection, project};
use crate::view::state::ViewState;

/// A fetched list plus the view state applied to it
///
/// Each view owns its own copy; there is no cache shared between views.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    state: ViewState,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: ViewState::default(),
        }
    }
}

impl<T: AdminEntity + Listable> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            state: ViewState::default(),
        }
    }

    /// Items in fetch order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn set_state(&mut self, state: ViewState) {
        self.state = state;
    }

    /// Replace the view state with a value derived from the current one
    pub fn update_state(&mut self, f: impl FnOnce(&ViewState) -> ViewState) {
        self.state = f(&self.state);
    }

    /// Current projection of the items through the view state
    pub fn view(&self) -> Projection<'_, T> {
        project(&self.items, &self.state)
    }

    /// Swap in a freshly fetched list, keeping the view state
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Apply a successful deletion locally
    pub fn remove(&mut self, id: i64) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Insert or replace an entity by identifier
    pub fn upsert(&mut self, entity: T) {
        match self.items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => *slot = entity,
            None => self.items.push(entity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
