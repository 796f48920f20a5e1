//! `catalog-app`
//!
//! **Responsibility:** the client-side workflows of the product catalog.
//!
//! This crate provides:
//! - `ProductListController`: fetch lifecycle, selection set, single/batch deletion
//! - `ProductFormController`: draft editing, on-submit validation, creation
//! - `Ui`: the boundary to whatever renders notices, confirmations and routes
//!
//! The remote catalog remains the authority; nothing here persists data.

pub mod form;
pub mod list;
pub mod ui;

pub use form::{ProductAdded, ProductFormController, SubmitOutcome};
pub use list::{DeleteOutcome, ListPhase, ListSnapshot, ProductListController};
pub use ui::{Notice, RecordingUi, Route, Ui};
