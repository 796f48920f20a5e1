use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use catalog_core::ProductId;
use catalog_products::{NewProduct, Product};

use crate::error::ServiceError;
use crate::service::{CatalogService, CreateAck, Listing};

/// A call observed by [`InMemoryCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    List,
    Create(NewProduct),
    Delete(Vec<ProductId>),
}

#[derive(Debug, Default)]
struct Inner {
    products: Vec<Product>,
    next_id: u64,
    calls: Vec<CatalogCall>,
    list_faults: VecDeque<Result<Value, ServiceError>>,
    create_faults: VecDeque<ServiceError>,
    delete_faults: VecDeque<ServiceError>,
}

/// In-memory catalog with numeric ids.
///
/// Intended for tests/dev. Records every call and lets a test queue one-shot
/// faults (transport errors or malformed list bodies) ahead of normal behaviour.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: Mutex<Inner>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing products. New ids continue after the highest numeric id.
    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().filter_map(|p| p.id.as_number()).max().unwrap_or(0);
        Self {
            inner: Mutex::new(Inner {
                products,
                next_id,
                ..Inner::default()
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn products(&self) -> Vec<Product> {
        self.inner().products.clone()
    }

    pub fn calls(&self) -> Vec<CatalogCall> {
        self.inner().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner().calls.clear();
    }

    /// Make the next `list()` fail with `err`.
    pub fn fail_next_list(&self, err: ServiceError) {
        self.inner().list_faults.push_back(Err(err));
    }

    /// Make the next `list()` answer with an arbitrary body.
    pub fn respond_next_list(&self, body: Value) {
        self.inner().list_faults.push_back(Ok(body));
    }

    pub fn fail_next_create(&self, err: ServiceError) {
        self.inner().create_faults.push_back(err);
    }

    pub fn fail_next_delete(&self, err: ServiceError) {
        self.inner().delete_faults.push_back(err);
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn list(&self) -> Result<Listing, ServiceError> {
        let mut inner = self.inner();
        inner.calls.push(CatalogCall::List);
        match inner.list_faults.pop_front() {
            Some(Ok(body)) => Ok(Listing::from_json(body)),
            Some(Err(err)) => Err(err),
            None => Ok(Listing::Products(inner.products.clone())),
        }
    }

    async fn create(&self, payload: &NewProduct) -> Result<CreateAck, ServiceError> {
        let mut inner = self.inner();
        inner.calls.push(CatalogCall::Create(payload.clone()));
        if let Some(err) = inner.create_faults.pop_front() {
            return Err(err);
        }

        inner.next_id += 1;
        let product = Product {
            id: ProductId::from(inner.next_id),
            sku: payload.sku.clone(),
            name: payload.name.clone(),
            price: payload.price,
            attributes: payload.attributes.clone(),
        };
        inner.products.push(product);
        Ok(CreateAck::new("Product added successfully"))
    }

    async fn delete(&self, ids: &[ProductId]) -> Result<(), ServiceError> {
        let mut inner = self.inner();
        inner.calls.push(CatalogCall::Delete(ids.to_vec()));
        if let Some(err) = inner.delete_faults.pop_front() {
            return Err(err);
        }

        inner.products.retain(|p| !ids.contains(&p.id));
        Ok(())
    }
}
