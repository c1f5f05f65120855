use super::ApiClient;
use crate::core::draft::Draft;
use crate::core::entity::AdminEntity;
use crate::core::error::{ClientError, ClientResult};
use crate::core::repository::{OrderQueries, Repository, ensure_resource};
use crate::core::schema::Resource;
use crate::entities::{Order, OrderStatus};
use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use std::marker::PhantomData;

/// Extract a human-readable message from a JSON error body
///
/// Tries `message`, `error_description`, `error` and `detail`, skipping
/// empty values, then falls back to the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error_description", "error", "detail"] {
            match json.get(key).and_then(Value::as_str).map(str::trim) {
                Some(message) if !message.is_empty() => return message.to_string(),
                _ => {}
            }
        }
    }
    body.trim().to_string()
}

/// Map a reqwest failure onto the transport taxonomy
fn transport_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::timeout(error.to_string())
    } else {
        ClientError::transport(error.to_string())
    }
}

/// REST repository for one resource
pub struct HttpRepository<T> {
    client: ApiClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpRepository<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: AdminEntity> HttpRepository<T> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    fn request(&self, method: Method, path: &[&str]) -> RequestBuilder {
        let url = self.client.url(T::RESOURCE, path);
        tracing::debug!(resource = %T::RESOURCE, %method, %url, "Sending request");
        self.client.http().request(method, url)
    }

    async fn send(&self, request: RequestBuilder, id: Option<i64>) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            let error = transport_error(e);
            tracing::warn!(resource = %T::RESOURCE, error = %error, "Request failed");
            error
        })?;
        check_response(T::RESOURCE, id, response).await
    }

    fn parse(text: &str) -> ClientResult<Value> {
        serde_json::from_str(text).map_err(|e| ClientError::decode(T::RESOURCE, e))
    }

    async fn body(response: Response) -> ClientResult<Value> {
        let text = response.text().await.map_err(transport_error)?;
        Self::parse(&text)
    }

    async fn fetch_list(&self, path: &[&str]) -> ClientResult<Vec<T>> {
        let response = self.send(self.request(Method::GET, path), None).await?;
        decode_list(Self::body(response).await?)
    }

    async fn fetch_one(&self, request: RequestBuilder, id: Option<i64>) -> ClientResult<T> {
        let response = self.send(request, id).await?;
        T::from_api(Self::body(response).await?)
    }

    async fn fetch_by_id(&self, id: i64) -> ClientResult<T> {
        let id_str = id.to_string();
        self.fetch_one(self.request(Method::GET, &[&id_str]), Some(id))
            .await
    }

    /// Entity written by a POST or PATCH
    ///
    /// A response without a body (`201 Created` with only a `Location`
    /// header, or `204`) is followed by a fetch of the saved entity.
    async fn save(&self, request: RequestBuilder, id: Option<i64>) -> ClientResult<T> {
        let response = self.send(request, id).await?;
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(trailing_id);
        let text = response.text().await.map_err(transport_error)?;
        if !text.trim().is_empty() {
            return T::from_api(Self::parse(&text)?);
        }

        match location.or(id) {
            Some(saved) => {
                tracing::debug!(resource = %T::RESOURCE, id = saved, "Fetching saved entity");
                self.fetch_by_id(saved).await
            }
            None => Err(ClientError::decode(
                T::RESOURCE,
                "saved without a response body or a Location header",
            )),
        }
    }
}

/// Id at the end of a `Location` header such as `/api/costumer/5`
fn trailing_id(location: &str) -> Option<i64> {
    let path = location.split(['?', '#']).next()?;
    path.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

/// Map an HTTP response to a `ClientError` based on status code
async fn check_response(
    resource: Resource,
    id: Option<i64>,
    response: Response,
) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let status_code = status.as_u16();
    let body = response.text().await.unwrap_or_default();
    let mut message = extract_error_message(&body);
    if message.is_empty() {
        message = status.canonical_reason().unwrap_or("Request failed").to_string();
    }

    let error = match (status_code, id) {
        (404, Some(id)) => ClientError::NotFound { resource, id },
        _ => ClientError::application(resource, status_code, message),
    };
    tracing::warn!(%resource, status = status_code, error = %error, "Request rejected");
    Err(error)
}

fn decode_list<T: AdminEntity>(body: Value) -> ClientResult<Vec<T>> {
    match body {
        Value::Array(items) => items.into_iter().map(T::from_api).collect(),
        other => Err(ClientError::decode(
            T::RESOURCE,
            format!("expected a JSON array, got {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl<T: AdminEntity> Repository<T> for HttpRepository<T> {
    async fn list_all(&self) -> ClientResult<Vec<T>> {
        self.fetch_list(&[]).await
    }

    async fn get_by_id(&self, id: i64) -> ClientResult<T> {
        self.fetch_by_id(id).await
    }

    async fn create(&self, draft: &Draft) -> ClientResult<T> {
        ensure_resource::<T>(draft)?;
        let payload = draft.to_payload()?;
        self.save(self.request(Method::POST, &[]).json(&payload), None)
            .await
    }

    async fn update(&self, id: i64, draft: &Draft) -> ClientResult<T> {
        ensure_resource::<T>(draft)?;
        let payload = draft.to_payload()?;
        let id_str = id.to_string();
        self.save(
            self.request(Method::PATCH, &[&id_str]).json(&payload),
            Some(id),
        )
        .await
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        let id_str = id.to_string();
        self.send(self.request(Method::DELETE, &[&id_str]), Some(id))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl OrderQueries for HttpRepository<Order> {
    async fn by_status(&self, status: OrderStatus) -> ClientResult<Vec<Order>> {
        self.fetch_list(&["filter", status.as_str()]).await
    }

    async fn by_customer(&self, customer_id: i64) -> ClientResult<Vec<Order>> {
        let id = customer_id.to_string();
        self.fetch_list(&["costumer", &id]).await
    }

    async fn by_business(&self, business_id: i64) -> ClientResult<Vec<Order>> {
        let id = business_id.to_string();
        self.fetch_list(&["business", &id]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Category;
    use serde_json::json;

    #[test]
    fn test_extract_error_message() {
        assert_eq!(extract_error_message(r#"{"message":"boom"}"#), "boom");
        assert_eq!(
            extract_error_message(r#"{"error_description":"bad token"}"#),
            "bad token"
        );
        assert_eq!(extract_error_message("plain failure\n"), "plain failure");
    }

    #[test]
    fn test_extract_error_message_skips_empty_fields() {
        let spring = r#"{"timestamp":"2024-03-01T10:00:00","status":500,"error":"Internal Server Error","message":"","path":"/api/product"}"#;
        assert_eq!(extract_error_message(spring), "Internal Server Error");
    }

    #[test]
    fn test_trailing_id_from_location() {
        assert_eq!(trailing_id("/api/costumer/5"), Some(5));
        assert_eq!(trailing_id("http://localhost:8080/api/order/12/"), Some(12));
        assert_eq!(trailing_id("/api/product/7?view=full"), Some(7));
        assert_eq!(trailing_id("/api/costumer"), None);
    }

    #[test]
    fn test_decode_list_requires_array() {
        let err = decode_list::<Category>(json!({"id": 1})).unwrap_err();
        assert!(err.to_string().contains("expected a JSON array"));

        let list = decode_list::<Category>(json!([{"id": 1, "name": "Tools"}])).unwrap();
        assert_eq!(list[0].name, "Tools");
    }
}
