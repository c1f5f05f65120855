//! Core module containing the resource model, drafts, validation and the
//! repository traits every backend implements

pub mod draft;
pub mod entity;
pub mod error;
pub mod field;
pub mod format;
pub mod repository;
pub mod schema;
pub mod validation;

pub use draft::{Draft, OrderItemDraft};
pub use entity::AdminEntity;
pub use error::{ClientError, ClientResult, ConfigError, ValidationErrors};
pub use field::{FieldFormat, FieldKind};
pub use repository::{OrderQueries, PaymentQueries, Repository};
pub use schema::{DraftMode, FieldSpec, Resource, ResourceSchema};
