//! In-memory implementation of Repository for testing and development

use crate::core::draft::Draft;
use crate::core::entity::AdminEntity;
use crate::core::error::{ClientError, ClientResult};
use crate::core::format::generate_order_number;
use crate::core::repository::{OrderQueries, Repository, ensure_resource};
use crate::core::schema::Resource;
use crate::entities::normalize::canonicalize;
use crate::entities::{Order, OrderStatus};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, VecDeque};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// In-memory repository implementation
///
/// Records are kept as canonical JSON and decoded on the way out, so drafts
/// go through the same payload building and normalization as they would
/// against the real API. Uses RwLock for thread-safe access.
pub struct InMemoryRepository<T> {
    records: Arc<RwLock<BTreeMap<i64, Value>>>,
    next_id: Arc<AtomicI64>,
    failures: Arc<Mutex<VecDeque<ClientError>>>,
    calls: Arc<AtomicUsize>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            next_id: Arc::clone(&self.next_id),
            failures: Arc::clone(&self.failures),
            calls: Arc::clone(&self.calls),
            _entity: PhantomData,
        }
    }
}

impl<T: AdminEntity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: AdminEntity> InMemoryRepository<T> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            failures: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            _entity: PhantomData,
        }
    }

    /// Create a repository pre-populated with entities
    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> ClientResult<Self> {
        let repo = Self::new();
        for entity in entities {
            repo.insert(entity)?;
        }
        Ok(repo)
    }

    /// Store an entity as-is, keeping its identifier
    pub fn insert(&self, entity: T) -> ClientResult<()> {
        let id = entity.id();
        let value = serde_json::to_value(&entity).map_err(|e| ClientError::decode(T::RESOURCE, e))?;
        self.write()?.insert(id, value);
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);
        Ok(())
    }

    /// Make the next operation fail with `error`
    ///
    /// Queued failures are consumed in order, one per operation.
    pub fn fail_next(&self, error: ClientError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push_back(error);
        }
    }

    /// Number of operations attempted so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn begin(&self) -> ClientResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let queued = self
            .failures
            .lock()
            .map_err(|e| ClientError::transport(format!("Failed to acquire lock: {}", e)))?
            .pop_front();
        match queued {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn read(&self) -> ClientResult<std::sync::RwLockReadGuard<'_, BTreeMap<i64, Value>>> {
        self.records
            .read()
            .map_err(|e| ClientError::transport(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> ClientResult<std::sync::RwLockWriteGuard<'_, BTreeMap<i64, Value>>> {
        self.records
            .write()
            .map_err(|e| ClientError::transport(format!("Failed to acquire write lock: {}", e)))
    }

    fn decode(value: Value) -> ClientResult<T> {
        T::from_api(value)
    }

    fn not_found(id: i64) -> ClientError {
        ClientError::NotFound {
            resource: T::RESOURCE,
            id,
        }
    }

    fn list_where(&self, keep: impl Fn(&T) -> bool) -> ClientResult<Vec<T>> {
        let records = self.read()?;
        let mut entities = Vec::with_capacity(records.len());
        for value in records.values() {
            let entity = Self::decode(value.clone())?;
            if keep(&entity) {
                entities.push(entity);
            }
        }
        Ok(entities)
    }
}

fn now() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Canonical form of a request payload
fn canonical_payload(resource: Resource, payload: Value) -> Map<String, Value> {
    match canonicalize(resource, payload) {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[async_trait]
impl<T: AdminEntity> Repository<T> for InMemoryRepository<T> {
    async fn list_all(&self) -> ClientResult<Vec<T>> {
        self.begin()?;
        self.list_where(|_| true)
    }

    async fn get_by_id(&self, id: i64) -> ClientResult<T> {
        self.begin()?;
        let value = self.read()?.get(&id).cloned().ok_or_else(|| Self::not_found(id))?;
        Self::decode(value)
    }

    async fn create(&self, draft: &Draft) -> ClientResult<T> {
        ensure_resource::<T>(draft)?;
        let payload = draft.to_payload()?;
        self.begin()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut record = canonical_payload(T::RESOURCE, payload);
        record.insert("id".to_string(), Value::from(id));
        record.insert("created_at".to_string(), now());
        record.insert("updated_at".to_string(), now());
        if T::RESOURCE == Resource::Order {
            record
                .entry("order_number")
                .or_insert_with(|| Value::String(generate_order_number(Utc::now())));
        }

        let record = Value::Object(record);
        let entity = Self::decode(record.clone())?;
        self.write()?.insert(id, record);
        tracing::debug!(resource = %T::RESOURCE, id, "Created in memory");
        Ok(entity)
    }

    async fn update(&self, id: i64, draft: &Draft) -> ClientResult<T> {
        ensure_resource::<T>(draft)?;
        let payload = draft.to_payload()?;
        self.begin()?;

        let mut records = self.write()?;
        let Some(Value::Object(record)) = records.get(&id).cloned() else {
            return Err(Self::not_found(id));
        };

        // PATCH semantics: sent fields replace, others are kept
        let mut merged = record;
        for (key, value) in canonical_payload(T::RESOURCE, payload) {
            merged.insert(key, value);
        }
        merged.insert("updated_at".to_string(), now());

        let merged = Value::Object(merged);
        let entity = Self::decode(merged.clone())?;
        records.insert(id, merged);
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.begin()?;
        match self.write()?.remove(&id) {
            Some(_) => Ok(()),
            None => Err(Self::not_found(id)),
        }
    }
}

#[async_trait]
impl OrderQueries for InMemoryRepository<Order> {
    async fn by_status(&self, status: OrderStatus) -> ClientResult<Vec<Order>> {
        self.begin()?;
        self.list_where(|order| order.order_status == status)
    }

    async fn by_customer(&self, customer_id: i64) -> ClientResult<Vec<Order>> {
        self.begin()?;
        self.list_where(|order| order.customer_id == customer_id)
    }

    /// Orders whose stored record carries the given `business_id`
    async fn by_business(&self, business_id: i64) -> ClientResult<Vec<Order>> {
        self.begin()?;
        let records = self.read()?;
        let mut orders = Vec::new();
        for value in records.values() {
            if value.get("business_id").and_then(Value::as_i64) == Some(business_id) {
                orders.push(Self::decode(value.clone())?);
            }
        }
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repository::PaymentQueries;
    use crate::core::schema::DraftMode;
    use crate::entities::{Category, Payment, PaymentStatus, Product};

    fn category_draft(name: &str) -> Draft {
        Draft::new(Resource::Category, DraftMode::Create).with("name", name)
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_timestamps() {
        let repo = InMemoryRepository::<Category>::new();
        let first = repo.create(&category_draft("Tools")).await.unwrap();
        let second = repo.create(&category_draft("Garden")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.created_at.is_some());
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_storage() {
        let repo = InMemoryRepository::<Category>::new();
        let err = repo.create(&category_draft("  ")).await.unwrap_err();

        assert!(err.validation_errors().unwrap().contains("name"));
        assert_eq!(repo.calls(), 0);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_resource_draft_rejected() {
        let repo = InMemoryRepository::<Product>::new();
        let err = repo.create(&category_draft("Tools")).await.unwrap_err();
        assert_eq!(err.error_code(), "RESOURCE_MISMATCH");
    }

    #[tokio::test]
    async fn test_update_keeps_business_on_product() {
        let repo = InMemoryRepository::<Product>::new();
        let created = repo
            .create(
                &Draft::new(Resource::Product, DraftMode::Create)
                    .with("name", "Lamp")
                    .with("description", "Desk lamp")
                    .with("price", "19.99")
                    .with("quantity", "2")
                    .with("category_id", "1")
                    .with("business_id", "7"),
            )
            .await
            .unwrap();

        let draft = created.to_draft().with("business_id", "99").with("price", "24.00");
        let updated = repo.update(created.id, &draft).await.unwrap();

        assert_eq!(updated.business_id, 7);
        assert_eq!(updated.price.to_string(), "24.00");
    }

    #[tokio::test]
    async fn test_missing_entity_is_not_found() {
        let repo = InMemoryRepository::<Category>::new();
        assert_eq!(
            repo.get_by_id(3).await.unwrap_err().error_code(),
            "ENTITY_NOT_FOUND"
        );
        assert_eq!(repo.delete(3).await.unwrap_err().error_code(), "ENTITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot() {
        let repo = InMemoryRepository::<Category>::new();
        repo.fail_next(ClientError::timeout("slow"));

        assert!(repo.list_all().await.unwrap_err().is_transport());
        assert!(repo.list_all().await.is_ok());
    }

    #[tokio::test]
    async fn test_order_create_resolves_costumer_id() {
        let repo = InMemoryRepository::<Order>::new();
        let order = repo
            .create(
                &Draft::new(Resource::Order, DraftMode::Create)
                    .with("customer_id", "4")
                    .with_item("2", "3"),
            )
            .await
            .unwrap();

        assert_eq!(order.customer_id, 4);
        assert!(order.order_number.as_deref().unwrap().starts_with("ORD-"));
        assert_eq!(repo.by_customer(4).await.unwrap().len(), 1);
        assert!(repo.by_status(OrderStatus::Shipped).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_payment_queries_share_list_failure() {
        let repo = InMemoryRepository::<Payment>::new();
        repo.create(
            &Draft::new(Resource::Payment, DraftMode::Create)
                .with("amount", "10.00")
                .with("payment_method", "PAYPAL")
                .with("transaction_id", "TX-1")
                .with("customer_id", "3"),
        )
        .await
        .unwrap();

        assert_eq!(repo.by_status(PaymentStatus::Pending).await.unwrap().len(), 1);
        assert!(repo.by_customer(4).await.unwrap().is_empty());

        repo.fail_next(ClientError::transport("down"));
        assert!(repo.by_customer(3).await.unwrap_err().is_transport());
    }
}
