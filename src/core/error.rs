//! Typed error handling for the back-office client
//!
//! # Error Categories
//!
//! - [`ValidationErrors`]: local, field-keyed errors that block submission
//! - [`ClientError`]: failures of a repository operation (transport,
//!   remote rejection, missing entity, undecodable response)
//! - [`ConfigError`]: errors while loading the API configuration
//!
//! # Example
//!
//! ```rust,ignore
//! match repo.get_by_id(7).await {
//!     Ok(product) => println!("Found: {}", product.name),
//!     Err(ClientError::NotFound { id, .. }) => println!("Product {} is gone", id),
//!     Err(e) if e.is_transport() => println!("Offline, retry later"),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::schema::Resource;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

// =============================================================================
// Validation Errors
// =============================================================================

/// Field-level validation errors, keyed by field name in detection order
///
/// Order item errors use `order_items.{index}.{field}` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first message for a field wins
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.shift_remove(field)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.0.retain(|field, message| keep(field, message));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge another error set, keeping existing messages
    pub fn extend(&mut self, other: ValidationErrors) {
        for (field, message) in other.0 {
            self.insert(field, message);
        }
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }

    /// `Ok(())` when empty, otherwise the errors themselves
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "Validation errors: {}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}

// =============================================================================
// Client Errors
// =============================================================================

/// Failure of a repository operation
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The API could not be reached or did not answer in time
    #[error("Transport error: {message}")]
    Transport { message: String, timeout: bool },

    /// The API answered with a non-success status
    #[error("{resource} request rejected with status {status}: {message}")]
    Application {
        resource: Resource,
        status: u16,
        message: String,
    },

    /// The requested entity does not exist
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: Resource, id: i64 },

    /// The API answered with a body that is not a valid entity
    #[error("Failed to decode {resource}: {message}")]
    Decode { resource: Resource, message: String },

    /// A draft handed to the wrong repository
    #[error("Expected a {expected} draft, got a {found} draft")]
    ResourceMismatch { expected: Resource, found: Resource },

    /// The draft did not pass local validation
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The client was built from unusable settings
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Backend messages emitted when a stale identifier is resubmitted
const CONFLICT_MARKERS: [&str; 2] = ["Identifier of an instance", "was altered"];

impl ClientError {
    pub fn transport(message: impl Into<String>) -> Self {
        ClientError::Transport {
            message: message.into(),
            timeout: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        ClientError::Transport {
            message: message.into(),
            timeout: true,
        }
    }

    pub fn application(resource: Resource, status: u16, message: impl Into<String>) -> Self {
        ClientError::Application {
            resource,
            status,
            message: message.into(),
        }
    }

    pub fn decode(resource: Resource, message: impl fmt::Display) -> Self {
        ClientError::Decode {
            resource,
            message: message.to_string(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport { timeout: true, .. } => "TIMEOUT",
            ClientError::Transport { .. } => "TRANSPORT_ERROR",
            ClientError::Application { .. } if self.is_conflict() => "IDENTIFIER_CONFLICT",
            ClientError::Application { .. } => "APPLICATION_ERROR",
            ClientError::NotFound { .. } => "ENTITY_NOT_FOUND",
            ClientError::Decode { .. } => "DECODE_ERROR",
            ClientError::ResourceMismatch { .. } => "RESOURCE_MISMATCH",
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }

    /// Whether the remote side rejected a stale or altered identifier
    ///
    /// The recovery for a conflict is to re-fetch the entity before retrying.
    pub fn is_conflict(&self) -> bool {
        match self {
            ClientError::Application {
                status, message, ..
            } => *status == 409 || CONFLICT_MARKERS.iter().any(|m| message.contains(m)),
            _ => false,
        }
    }

    /// Field errors carried by a local validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ClientError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// A specialized Result type for repository operations
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error while reading configuration
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}
