//! Entity trait shared by the six back-office resources

use crate::core::draft::Draft;
use crate::core::error::{ClientError, ClientResult};
use crate::core::schema::Resource;
use crate::entities::normalize;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Base trait for all back-office entities.
///
/// Implementors hold the canonical internal shape of one resource. Raw API
/// responses only become entities through [`AdminEntity::from_api`], which
/// runs the normalization boundary first.
pub trait AdminEntity:
    Clone + fmt::Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// The resource this entity belongs to
    const RESOURCE: Resource;

    /// Numeric identifier, unique within the resource
    fn id(&self) -> i64;

    /// Short human-readable name, used in lists and prompts
    fn display_name(&self) -> String;

    /// Edit-mode draft pre-populated from this entity
    fn to_draft(&self) -> Draft;

    /// Creation timestamp, when the API reports one
    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Decode a raw API response into the canonical shape
    fn from_api(value: Value) -> ClientResult<Self> {
        let canonical = normalize::canonicalize(Self::RESOURCE, value);
        serde_json::from_value(canonical).map_err(|e| ClientError::decode(Self::RESOURCE, e))
    }
}
