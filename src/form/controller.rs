//! Create/edit form state machine
//!
//! ```text
//! Idle → Loading (edit only) → Editing → Submitting → Success
//!                  ↓                          ↓
//!                Failed ←──── (load)       Editing + form error
//! ```
//!
//! Requests are split into a `begin_*` step that hands out a ticket and a
//! `finish_*` step that applies the result. Tickets carry the generation of
//! the form session; [`FormController::leave`] and [`FormController::reset`]
//! start a new generation, so completions arriving afterwards are ignored.

use crate::core::draft::{Draft, OrderItemDraft};
use crate::core::entity::AdminEntity;
use crate::core::error::{ClientResult, ValidationErrors};
use crate::core::repository::Repository;
use crate::core::schema::DraftMode;
use crate::form::error::{FormError, FormErrorKind};

/// Lifecycle state of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Loading,
    Editing,
    Submitting,
    Success,
    /// Loading the entity failed; the draft stays editable
    Failed,
}

/// Handle for an in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    id: i64,
}

impl LoadTicket {
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// Handle for an in-flight submission, with the validated draft to send
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    generation: u64,
    target: Option<i64>,
    draft: Draft,
}

impl SubmitTicket {
    /// `None` for a create, the entity id for an update
    pub fn target(&self) -> Option<i64> {
        self.target
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Saved; the caller should navigate away
    Saved(T),
    /// Local validation failed; the form stays in Editing
    Invalid(ValidationErrors),
    /// The repository call failed; the form is back in Editing
    Failed(FormError),
    /// A submission is already in flight
    Busy,
    /// The form is not in an editable state
    NotEditable,
    /// The completion belonged to an earlier form session
    Stale,
}

/// Form controller for one resource
#[derive(Debug)]
pub struct FormController<T: AdminEntity> {
    mode: DraftMode,
    id: Option<i64>,
    draft: Draft,
    errors: ValidationErrors,
    form_error: Option<FormError>,
    state: FormState,
    generation: u64,
    saved: Option<T>,
}

impl<T: AdminEntity> FormController<T> {
    /// Form for a new entity, ready for editing with creation defaults
    pub fn for_create() -> Self {
        Self::with_draft(DraftMode::Create, None, FormState::Editing)
    }

    /// Form for an existing entity; call [`Self::load`] or
    /// [`Self::begin_load`] to fetch it
    pub fn for_edit(id: i64) -> Self {
        Self::with_draft(DraftMode::Edit, Some(id), FormState::Idle)
    }

    fn with_draft(mode: DraftMode, id: Option<i64>, state: FormState) -> Self {
        Self {
            mode,
            id,
            draft: Draft::new(T::RESOURCE, mode),
            errors: ValidationErrors::new(),
            form_error: None,
            state,
            generation: 0,
            saved: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn mode(&self) -> DraftMode {
        self.mode
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Field-level errors from the last submit attempt, minus corrected ones
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn form_error(&self) -> Option<&FormError> {
        self.form_error.as_ref()
    }

    /// Entity returned by the last successful submission
    pub fn saved(&self) -> Option<&T> {
        self.saved.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether field updates are accepted
    pub fn accepts_edits(&self) -> bool {
        matches!(self.state, FormState::Editing | FormState::Failed)
    }

    /// Whether the submit action should be enabled
    pub fn can_submit(&self) -> bool {
        self.accepts_edits()
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Start fetching the entity being edited
    ///
    /// Returns `None` for create forms and while a submission is in flight.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        let id = self.id?;
        if self.state == FormState::Submitting {
            return None;
        }
        self.state = FormState::Loading;
        Some(LoadTicket {
            generation: self.generation,
            id,
        })
    }

    /// Apply a fetch result; returns `false` for stale tickets
    pub fn finish_load(&mut self, ticket: LoadTicket, result: ClientResult<T>) -> bool {
        if ticket.generation != self.generation || self.state != FormState::Loading {
            tracing::debug!(resource = %T::RESOURCE, id = ticket.id, "Ignoring stale load");
            return false;
        }

        match result {
            Ok(entity) => {
                self.draft = entity.to_draft();
                self.errors.clear();
                self.form_error = None;
                self.state = FormState::Editing;
            }
            Err(error) => {
                tracing::warn!(resource = %T::RESOURCE, id = ticket.id, %error, "Failed to load for editing");
                self.form_error = Some(FormError::from_load(T::RESOURCE, &error));
                self.state = FormState::Failed;
            }
        }
        true
    }

    /// Fetch the entity being edited and populate the draft
    pub async fn load<R>(&mut self, repo: &R) -> bool
    where
        R: Repository<T> + ?Sized,
    {
        let Some(ticket) = self.begin_load() else {
            return false;
        };
        let result = repo.get_by_id(ticket.id).await;
        self.finish_load(ticket, result)
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Update one field; returns `false` if the edit was refused
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        if !self.accepts_edits() {
            return false;
        }
        let changed = self.draft.set(field, value);
        if changed {
            self.reconcile_errors();
        }
        changed
    }

    /// Append a blank order item
    pub fn add_item(&mut self) -> bool {
        if !self.accepts_edits() || !T::RESOURCE.schema().has_items {
            return false;
        }
        self.draft.push_item(OrderItemDraft::blank());
        self.reconcile_errors();
        true
    }

    pub fn remove_item(&mut self, index: usize) -> bool {
        if !self.accepts_edits() {
            return false;
        }
        let removed = self.draft.remove_item(index).is_some();
        if removed {
            // Item keys shift with the removal
            self.errors.retain(|field, _| !field.starts_with("order_items."));
            self.reconcile_errors();
        }
        removed
    }

    pub fn set_item_product(&mut self, index: usize, product_id: impl Into<String>) -> bool {
        self.edit_item(index, |item| item.product_id = product_id.into())
    }

    pub fn set_item_quantity(&mut self, index: usize, quantity: impl Into<String>) -> bool {
        self.edit_item(index, |item| item.quantity = quantity.into())
    }

    fn edit_item(&mut self, index: usize, f: impl FnOnce(&mut OrderItemDraft)) -> bool {
        if !self.accepts_edits() {
            return false;
        }
        let Some(item) = self.draft.item_mut(index) else {
            return false;
        };
        f(item);
        self.reconcile_errors();
        true
    }

    /// Drop error entries the current draft no longer produces
    fn reconcile_errors(&mut self) {
        if self.errors.is_empty() {
            return;
        }
        let fresh = self.draft.validate();
        self.errors.retain(|field, _| fresh.contains(field));
    }

    // ------------------------------------------------------------------
    // Submitting
    // ------------------------------------------------------------------

    /// Validate and, if clean, move to Submitting
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitOutcome<T>> {
        match self.state {
            FormState::Submitting => return Err(SubmitOutcome::Busy),
            FormState::Editing | FormState::Failed => {}
            FormState::Idle | FormState::Loading | FormState::Success => {
                return Err(SubmitOutcome::NotEditable);
            }
        }

        let errors = self.draft.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            self.state = FormState::Editing;
            return Err(SubmitOutcome::Invalid(errors));
        }

        self.errors.clear();
        self.form_error = None;
        self.state = FormState::Submitting;
        Ok(SubmitTicket {
            generation: self.generation,
            target: match self.mode {
                DraftMode::Create => None,
                DraftMode::Edit => self.id,
            },
            draft: self.draft.clone(),
        })
    }

    /// Apply the repository result of a submission
    pub fn finish_submit(&mut self, ticket: SubmitTicket, result: ClientResult<T>) -> SubmitOutcome<T> {
        if ticket.generation != self.generation || self.state != FormState::Submitting {
            tracing::debug!(resource = %T::RESOURCE, "Ignoring stale submission");
            return SubmitOutcome::Stale;
        }

        match result {
            Ok(entity) => {
                tracing::debug!(resource = %T::RESOURCE, id = entity.id(), "Saved");
                self.saved = Some(entity.clone());
                self.state = FormState::Success;
                SubmitOutcome::Saved(entity)
            }
            Err(error) => {
                tracing::warn!(resource = %T::RESOURCE, %error, "Failed to save");
                if let Some(errors) = error.validation_errors() {
                    self.errors = errors.clone();
                }
                let form_error = FormError::from_save(T::RESOURCE, &error);
                self.form_error = Some(form_error.clone());
                self.state = FormState::Editing;
                SubmitOutcome::Failed(form_error)
            }
        }
    }

    /// Validate, then create or update through `repo`
    ///
    /// On an identifier conflict while editing, the entity is re-fetched so
    /// the next attempt starts from current references; the conflict message
    /// stays attached.
    pub async fn submit<R>(&mut self, repo: &R) -> SubmitOutcome<T>
    where
        R: Repository<T> + ?Sized,
    {
        let ticket = match self.begin_submit() {
            Ok(ticket) => ticket,
            Err(outcome) => return outcome,
        };

        let result = match ticket.target {
            None => repo.create(&ticket.draft).await,
            Some(id) => repo.update(id, &ticket.draft).await,
        };
        let outcome = self.finish_submit(ticket, result);

        if let SubmitOutcome::Failed(form_error) = &outcome {
            if form_error.kind == FormErrorKind::Conflict && self.mode == DraftMode::Edit {
                let form_error = form_error.clone();
                self.load(repo).await;
                if self.state == FormState::Editing {
                    self.form_error = Some(form_error);
                }
            }
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Leave the form, discarding the draft unconditionally
    pub fn leave(&mut self) {
        self.generation += 1;
        self.draft = Draft::new(T::RESOURCE, self.mode);
        self.errors.clear();
        self.form_error = None;
        self.saved = None;
        self.state = FormState::Idle;
    }

    /// Start over with a fresh draft in the same mode
    pub fn reset(&mut self) {
        self.leave();
        if self.mode == DraftMode::Create {
            self.state = FormState::Editing;
        }
    }
}
