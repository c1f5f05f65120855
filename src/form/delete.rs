//! Delete confirmation state machine
//!
//! ```text
//! Idle → ConfirmPending(id) → Deleting(id) → Deleted(id)
//!            ↓ cancel                      ↘ Failed(id, error)
//!           Idle
//! ```
//!
//! The confirmation prompt is a state rather than a blocking dialog, so the
//! list view decides how to render it and nothing is deleted without an
//! explicit [`DeleteController::confirm`].

use crate::core::entity::AdminEntity;
use crate::core::error::ClientResult;
use crate::core::repository::Repository;
use crate::core::schema::Resource;
use crate::form::error::FormError;
use crate::view::{Collection, Listable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    ConfirmPending { id: i64 },
    Deleting { id: i64 },
    Deleted { id: i64 },
    Failed { id: i64, error: FormError },
}

/// Handle for an in-flight deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTicket {
    generation: u64,
    id: i64,
}

impl DeleteTicket {
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// Confirmation text shown before deleting an entity of `resource`
pub fn confirmation_prompt(resource: Resource) -> &'static str {
    match resource {
        Resource::Business => {
            "Are you sure you want to delete this business? This will affect all related orders."
        }
        Resource::Category => {
            "Are you sure you want to delete this category? This will affect all products in this category."
        }
        Resource::Product => "Are you sure you want to delete this product?",
        Resource::Customer => {
            "Are you sure you want to delete this customer? This will affect all their orders."
        }
        Resource::Order => "Are you sure you want to delete this order? This action cannot be undone.",
        Resource::Payment => {
            "Are you sure you want to delete this payment record? This action cannot be undone."
        }
    }
}

#[derive(Debug)]
pub struct DeleteController {
    resource: Resource,
    state: DeleteState,
    generation: u64,
}

impl DeleteController {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            state: DeleteState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &DeleteState {
        &self.state
    }

    /// Prompt to show while a confirmation is pending
    pub fn prompt(&self) -> Option<&'static str> {
        match self.state {
            DeleteState::ConfirmPending { .. } => Some(confirmation_prompt(self.resource)),
            _ => None,
        }
    }

    /// Ask to delete `id`; refused while another deletion is in flight
    pub fn request(&mut self, id: i64) -> bool {
        if matches!(self.state, DeleteState::Deleting { .. }) {
            return false;
        }
        self.state = DeleteState::ConfirmPending { id };
        true
    }

    /// Dismiss a pending confirmation or a reported failure
    pub fn cancel(&mut self) {
        match self.state {
            DeleteState::ConfirmPending { .. } | DeleteState::Failed { .. } => {
                self.state = DeleteState::Idle;
            }
            DeleteState::Idle | DeleteState::Deleting { .. } | DeleteState::Deleted { .. } => {}
        }
    }

    /// Confirm the pending deletion
    pub fn confirm(&mut self) -> Option<DeleteTicket> {
        let DeleteState::ConfirmPending { id } = self.state else {
            return None;
        };
        self.state = DeleteState::Deleting { id };
        Some(DeleteTicket {
            generation: self.generation,
            id,
        })
    }

    /// Apply the repository result; returns `false` for stale tickets
    pub fn finish(&mut self, ticket: DeleteTicket, result: ClientResult<()>) -> bool {
        let current = matches!(self.state, DeleteState::Deleting { id } if id == ticket.id);
        if ticket.generation != self.generation || !current {
            return false;
        }

        self.state = match result {
            Ok(()) => DeleteState::Deleted { id: ticket.id },
            Err(error) => {
                tracing::warn!(resource = %self.resource, id = ticket.id, %error, "Failed to delete");
                DeleteState::Failed {
                    id: ticket.id,
                    error: FormError::from_delete(self.resource, &error),
                }
            }
        };
        true
    }

    /// Abandon any pending or in-flight deletion
    pub fn leave(&mut self) {
        self.generation += 1;
        self.state = DeleteState::Idle;
    }

    /// Confirm, delete through `repo` and, on success only, drop the entity
    /// from the list view's collection
    pub async fn confirm_and_delete<T, R>(
        &mut self,
        repo: &R,
        collection: &mut Collection<T>,
    ) -> &DeleteState
    where
        T: AdminEntity + Listable,
        R: Repository<T> + ?Sized,
    {
        let Some(ticket) = self.confirm() else {
            return &self.state;
        };
        let result = repo.delete(ticket.id).await;
        let succeeded = result.is_ok();
        if self.finish(ticket, result) && succeeded {
            collection.remove(ticket.id);
        }
        &self.state
    }
}
