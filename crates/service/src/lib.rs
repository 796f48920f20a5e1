//! `catalog-service`: the remote catalog the controllers talk to.
//!
//! This crate provides:
//! - The `CatalogService` capability (list / create / delete-by-ids)
//! - An HTTP implementation over `reqwest`
//! - An in-memory implementation for tests and local development
//! - Environment-driven configuration

pub mod config;
pub mod error;
pub mod http;
pub mod in_memory;
pub mod service;

pub use config::{CatalogConfig, ConfigError};
pub use error::ServiceError;
pub use http::HttpCatalogService;
pub use in_memory::{CatalogCall, InMemoryCatalog};
pub use service::{CatalogService, CreateAck, Listing};
