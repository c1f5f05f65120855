//! HTTP client for the back-office REST API

mod http;

pub use http::HttpRepository;

use crate::config::ApiConfig;
use crate::core::entity::AdminEntity;
use crate::core::error::{ClientError, ClientResult};
use crate::core::schema::Resource;
use crate::entities::{Business, Category, Customer, Order, Payment, Product};
use reqwest::Client;

/// Shared connection to the API
///
/// Cheap to clone; every repository created from it reuses the same
/// connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    api_root: String,
}

impl ApiClient {
    /// Build a client honouring the configured timeout and user agent
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_root: config.api_root(),
        })
    }

    /// `{base}/api`
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// URL of a resource collection, or of a path below it
    pub(crate) fn url(&self, resource: Resource, path: &[&str]) -> String {
        let mut url = format!("{}/{}", self.api_root, resource.segment());
        for part in path {
            url.push('/');
            url.push_str(part);
        }
        url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Repository for any resource
    pub fn repository<T: AdminEntity>(&self) -> HttpRepository<T> {
        HttpRepository::new(self.clone())
    }

    pub fn businesses(&self) -> HttpRepository<Business> {
        self.repository()
    }

    pub fn categories(&self) -> HttpRepository<Category> {
        self.repository()
    }

    pub fn products(&self) -> HttpRepository<Product> {
        self.repository()
    }

    pub fn customers(&self) -> HttpRepository<Customer> {
        self.repository()
    }

    pub fn orders(&self) -> HttpRepository<Order> {
        self.repository()
    }

    pub fn payments(&self) -> HttpRepository<Payment> {
        self.repository()
    }
}
