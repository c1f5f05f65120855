//! # Nile Admin
//!
//! Client-side core of a back-office for a small commerce platform:
//! businesses, categories, products, customers, orders and payments managed
//! over a remote REST API.
//!
//! ## Features
//!
//! - **Typed Entities**: One struct per resource, decoded leniently from the API
//! - **Drafts & Validation**: Field-level rules run before anything is sent
//! - **Repositories**: HTTP and in-memory backends behind one async trait
//! - **List Views**: Search, filter and sort projections over fetched lists
//! - **Form Controllers**: Load/edit/submit sessions with stale-result guards
//! - **Dashboard**: Concurrent aggregate fetch with partial results
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nile_admin::prelude::*;
//!
//! let config = ApiConfig::from_env()?;
//! let client = ApiClient::new(&config)?;
//!
//! let draft = Draft::new(Resource::Category, DraftMode::Create)
//!     .with("name", "Beverages");
//! let category = client.categories().create(&draft).await?;
//!
//! let products = client.products().list_all().await?;
//! let view = project(&products, &ViewState::default().with_search("tea"));
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod entities;
pub mod form;
pub mod logging;
pub mod storage;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AdminEntity, ClientError, ClientResult, ConfigError, Draft, DraftMode, FieldKind,
        OrderItemDraft, OrderQueries, PaymentQueries, Repository, Resource, ValidationErrors,
    };

    // === Entities ===
    pub use crate::entities::{
        Business, Category, Customer, CustomerSummary, Order, OrderItem, OrderStatus, Payment,
        PaymentMethod, PaymentStatus, Product, Tone,
    };

    // === Backends ===
    pub use crate::client::{ApiClient, HttpRepository};
    pub use crate::storage::InMemoryRepository;

    // === Config ===
    pub use crate::config::ApiConfig;

    // === Views & Forms ===
    pub use crate::dashboard::{DashboardSnapshot, load_dashboard};
    pub use crate::form::{DeleteController, DeleteState, FormController, FormError, FormState};
    pub use crate::view::{Collection, Listable, SortKey, ViewState, project};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
}
