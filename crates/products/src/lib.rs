//! Product catalog domain module.
//!
//! This crate contains the variant-typed product model, the in-progress form
//! draft, and the validation/projection rules that turn a draft into a create
//! payload. Pure domain logic (no IO, no HTTP, no storage).

pub mod draft;
pub mod validation;
pub mod variant;

pub use draft::{Draft, Field};
pub use validation::{ErrorMap, to_create_payload, validate};
pub use variant::{NewProduct, Product, ProductType, VariantAttributes};
