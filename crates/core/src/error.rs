//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures of local input (unknown field
/// names, unparseable identifiers). Per-field form validation is reported through
/// `catalog_products::ErrorMap`, and remote failures belong to the service layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. empty).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A field name did not match any known product field.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A product type string did not match any known variant.
    #[error("unknown product type: {0}")]
    UnknownProductType(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    pub fn unknown_product_type(name: impl Into<String>) -> Self {
        Self::UnknownProductType(name.into())
    }
}
