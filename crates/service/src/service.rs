//! The catalog capability consumed by the list and form controllers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use catalog_core::ProductId;
use catalog_products::{NewProduct, Product};

use crate::error::ServiceError;

/// Remote catalog of products.
///
/// Implementations own the transport. Callers never retry automatically and
/// never assume a call is cancellable.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch every product, in service order.
    async fn list(&self) -> Result<Listing, ServiceError>;

    /// Create a product from an already-projected payload.
    async fn create(&self, payload: &NewProduct) -> Result<CreateAck, ServiceError>;

    /// Delete the given products. Success means the service confirmed the
    /// deletion (HTTP 204 for the HTTP transport).
    async fn delete(&self, ids: &[ProductId]) -> Result<(), ServiceError>;
}

/// Outcome of a successful list call.
///
/// A body that is not an array of products is not a transport failure; it is
/// carried as `Malformed` so the caller can log it and fail soft.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Products(Vec<Product>),
    Malformed(Value),
}

impl Listing {
    /// Classify a decoded JSON body.
    pub fn from_json(value: Value) -> Self {
        if !value.is_array() {
            return Listing::Malformed(value);
        }
        match serde_json::from_value::<Vec<Product>>(value.clone()) {
            Ok(products) => Listing::Products(products),
            Err(err) => {
                tracing::debug!(error = %err, "list response is an array but not of products");
                Listing::Malformed(value)
            }
        }
    }

    /// Products, or nothing for a malformed body.
    pub fn into_products(self) -> Vec<Product> {
        match self {
            Listing::Products(products) => products,
            Listing::Malformed(_) => Vec::new(),
        }
    }
}

/// Acknowledgement of a committed create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAck {
    pub message: String,
}

impl CreateAck {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build from a raw response body: the `message` field when present,
    /// otherwise the body as-is.
    pub fn from_body(body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| body.to_string());
        Self { message }
    }
}
