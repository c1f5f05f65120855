//! Repository traits for entity operations

use crate::core::draft::Draft;
use crate::core::entity::AdminEntity;
use crate::core::error::{ClientError, ClientResult};
use crate::entities::{Order, OrderStatus, Payment, PaymentStatus};
use async_trait::async_trait;

/// Repository trait for one resource
///
/// Implementations provide list/get/create/update/delete against some
/// backend. Every operation is fallible; no implementation retries.
#[async_trait]
pub trait Repository<T: AdminEntity>: Send + Sync {
    /// List every entity of the resource
    async fn list_all(&self) -> ClientResult<Vec<T>>;

    /// Get an entity by ID
    async fn get_by_id(&self, id: i64) -> ClientResult<T>;

    /// Create a new entity from a create-mode draft
    async fn create(&self, draft: &Draft) -> ClientResult<T>;

    /// Update an entity from an edit-mode draft
    ///
    /// Fields fixed after creation are never sent.
    async fn update(&self, id: i64, draft: &Draft) -> ClientResult<T>;

    /// Delete an entity
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

/// Reject drafts belonging to another resource
pub fn ensure_resource<T: AdminEntity>(draft: &Draft) -> ClientResult<()> {
    if draft.resource() == T::RESOURCE {
        Ok(())
    } else {
        Err(ClientError::ResourceMismatch {
            expected: T::RESOURCE,
            found: draft.resource(),
        })
    }
}

/// Remote order queries
#[async_trait]
pub trait OrderQueries: Repository<Order> {
    /// `GET /api/order/filter/{status}`
    async fn by_status(&self, status: OrderStatus) -> ClientResult<Vec<Order>>;

    /// `GET /api/order/costumer/{id}`
    async fn by_customer(&self, customer_id: i64) -> ClientResult<Vec<Order>>;

    /// `GET /api/order/business/{id}`
    async fn by_business(&self, business_id: i64) -> ClientResult<Vec<Order>>;
}

/// Payment queries derived from [`Repository::list_all`]
///
/// The API has no dedicated endpoints for these, so every repository of
/// payments gets them for free and they fail exactly as `list_all` does.
#[async_trait]
pub trait PaymentQueries: Repository<Payment> {
    async fn by_status(&self, status: PaymentStatus) -> ClientResult<Vec<Payment>> {
        let payments = self.list_all().await?;
        Ok(payments
            .into_iter()
            .filter(|payment| payment.payment_status == status)
            .collect())
    }

    async fn by_customer(&self, customer_id: i64) -> ClientResult<Vec<Payment>> {
        let payments = self.list_all().await?;
        Ok(payments
            .into_iter()
            .filter(|payment| payment.customer_id == customer_id)
            .collect())
    }
}

impl<R: Repository<Payment> + ?Sized> PaymentQueries for R {}
