//! Form and delete-confirmation controllers

pub mod controller;
pub mod delete;
pub mod error;

pub use controller::{FormController, FormState, LoadTicket, SubmitOutcome, SubmitTicket};
pub use delete::{DeleteController, DeleteState, DeleteTicket, confirmation_prompt};
pub use error::{FormError, FormErrorKind, Recovery};
