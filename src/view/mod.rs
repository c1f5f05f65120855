//! Collection view logic shared by every list view
//!
//! A list view holds a [`Collection`] and an immutable [`ViewState`]; the
//! displayed sequence is always [`project`] of the two. Projection never
//! mutates the source, and applying the same state twice is idempotent.

pub mod collection;
pub mod projection;
pub mod state;
pub mod summary;

pub use collection::Collection;
pub use projection::{Listable, Projection, SortKind, SortValue, matches, project};
pub use state::{SortDirection, SortKey, ViewState};
