//! Form-level errors shown above a form rather than next to a field

use crate::core::error::ClientError;
use crate::core::schema::Resource;
use serde::Serialize;
use std::fmt;

/// What went wrong with a load, submit or delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormErrorKind {
    Transport,
    Application,
    /// Stale or altered identifier on the remote side
    Conflict,
    NotFound,
    Decode,
    Validation,
    /// Unusable client settings
    Config,
}

/// Action the user can take to recover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recovery {
    /// Resubmit unchanged
    Retry,
    /// Re-fetch the entity, then resubmit
    Refetch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormError {
    pub kind: FormErrorKind,
    pub message: String,
    pub recovery: Recovery,
}

impl FormError {
    pub fn new(kind: FormErrorKind, message: impl Into<String>, recovery: Recovery) -> Self {
        Self {
            kind,
            message: message.into(),
            recovery,
        }
    }

    /// Error shown when saving `resource` failed
    pub fn from_save(resource: Resource, error: &ClientError) -> Self {
        Self::from_client(resource, error, "save")
    }

    /// Error shown when loading `resource` for editing failed
    pub fn from_load(resource: Resource, error: &ClientError) -> Self {
        Self::from_client(resource, error, "load")
    }

    /// Error shown when deleting `resource` failed
    pub fn from_delete(resource: Resource, error: &ClientError) -> Self {
        Self::from_client(resource, error, "delete")
    }

    fn from_client(resource: Resource, error: &ClientError, action: &str) -> Self {
        match error {
            _ if error.is_conflict() => Self::new(
                FormErrorKind::Conflict,
                conflict_message(resource),
                Recovery::Refetch,
            ),
            ClientError::Transport { timeout: true, .. } => Self::new(
                FormErrorKind::Transport,
                format!(
                    "The server took too long to respond. Failed to {} {}. Please try again.",
                    action, resource
                ),
                Recovery::Retry,
            ),
            ClientError::Transport { .. } => Self::new(
                FormErrorKind::Transport,
                format!(
                    "Unable to reach the server. Failed to {} {}. Please try again.",
                    action, resource
                ),
                Recovery::Retry,
            ),
            ClientError::Application { message, .. } => {
                Self::new(FormErrorKind::Application, message.clone(), Recovery::Retry)
            }
            ClientError::NotFound { .. } => Self::new(
                FormErrorKind::NotFound,
                format!("{} not found. It may have been deleted.", resource.label()),
                Recovery::Refetch,
            ),
            ClientError::Decode { .. } | ClientError::ResourceMismatch { .. } => Self::new(
                FormErrorKind::Decode,
                format!(
                    "Failed to {} {}: unexpected response from the server.",
                    action, resource
                ),
                Recovery::Retry,
            ),
            ClientError::Validation(_) => Self::new(
                FormErrorKind::Validation,
                "Please correct the highlighted fields.",
                Recovery::Retry,
            ),
            ClientError::Config(_) => Self::new(
                FormErrorKind::Config,
                format!("Failed to {} {}: the API client is misconfigured.", action, resource),
                Recovery::Retry,
            ),
        }
    }
}

fn conflict_message(resource: Resource) -> String {
    let what = match resource {
        Resource::Product => "Category or Business ID",
        Resource::Order | Resource::Payment => "Customer ID",
        Resource::Business | Resource::Category | Resource::Customer => "ID",
    };
    format!("{} conflict detected. Please refresh and try again.", what)
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ConfigError;

    #[test]
    fn test_conflict_maps_to_refetch() {
        let err = ClientError::application(
            Resource::Product,
            500,
            "Identifier of an instance of Category was altered",
        );
        let form = FormError::from_save(Resource::Product, &err);
        assert_eq!(form.kind, FormErrorKind::Conflict);
        assert_eq!(form.recovery, Recovery::Refetch);
        assert!(form.message.starts_with("Category or Business ID conflict"));
    }

    #[test]
    fn test_application_message_is_passed_through() {
        let err = ClientError::application(Resource::Category, 400, "Name already taken");
        let form = FormError::from_save(Resource::Category, &err);
        assert_eq!(form.message, "Name already taken");
        assert_eq!(form.recovery, Recovery::Retry);
    }

    #[test]
    fn test_transport_is_generic_retry() {
        let form = FormError::from_save(Resource::Order, &ClientError::transport("refused"));
        assert_eq!(form.kind, FormErrorKind::Transport);
        assert!(form.message.contains("Please try again"));
        assert!(!form.message.contains("refused"));
    }

    #[test]
    fn test_config_error_is_not_reported_as_network_failure() {
        let err = ClientError::from(ConfigError::InvalidValue {
            field: "timeout_ms".to_string(),
            value: "0".to_string(),
            message: "must be greater than zero".to_string(),
        });
        let form = FormError::from_load(Resource::Customer, &err);
        assert_eq!(form.kind, FormErrorKind::Config);
        assert!(form.message.contains("misconfigured"));
    }
}
