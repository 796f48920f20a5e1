//! HTTP transport for the catalog service.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};

use catalog_core::ProductId;
use catalog_products::NewProduct;

use crate::config::CatalogConfig;
use crate::error::ServiceError;
use crate::service::{CatalogService, CreateAck, Listing};

const LIST_PATH: &str = "fetch_products.php";
const CREATE_PATH: &str = "add_product.php";
const DELETE_PATH: &str = "delete_products.php";

/// Catalog client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl HttpCatalogService {
    pub fn new(config: CatalogConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, self.config.endpoint(path));
        if let Some(token) = &self.config.auth_token {
            req = req.bearer_auth(token);
        }
        req
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn list(&self) -> Result<Listing, ServiceError> {
        let resp = self.request(reqwest::Method::GET, LIST_PATH).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(ServiceError::status(status.as_u16(), body));
        }

        // Anything that is not JSON (an HTML error page, say) is malformed, not fatal.
        let value = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
        Ok(Listing::from_json(value))
    }

    async fn create(&self, payload: &NewProduct) -> Result<CreateAck, ServiceError> {
        tracing::debug!(
            sku = %payload.sku,
            product_type = %payload.product_type(),
            "creating product"
        );

        let resp = self
            .request(reqwest::Method::POST, CREATE_PATH)
            .json(payload)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(ServiceError::status(status.as_u16(), body));
        }

        Ok(CreateAck::from_body(&body))
    }

    async fn delete(&self, ids: &[ProductId]) -> Result<(), ServiceError> {
        tracing::debug!(count = ids.len(), "deleting products");

        let resp = self
            .request(reqwest::Method::DELETE, DELETE_PATH)
            .json(&json!({ "ids": ids }))
            .send()
            .await?;

        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(ServiceError::status(status, body))
    }
}
