//! Product creation form.
//!
//! One controller mediates one creation attempt at a time: the draft is edited
//! freely, validated only on submit, projected to a variant-correct payload and
//! handed to the catalog service exactly once per valid submit.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use catalog_core::DomainResult;
use catalog_products::{Draft, ErrorMap, Field, ProductType, to_create_payload};
use catalog_service::{CatalogService, CreateAck, ServiceError};

use crate::ui::{Notice, Route, Ui};

/// Told when the form has created a product, so lists can reload.
#[async_trait]
pub trait ProductAdded: Send + Sync {
    async fn product_added(&self);
}

/// Result of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(CreateAck),
    /// Validation failed; no call was made.
    Invalid(ErrorMap),
    /// The service rejected or never received the request; the draft is kept.
    Failed(ServiceError),
    /// A previous submit is still waiting for the service.
    AlreadySubmitting,
}

#[derive(Debug, Default)]
struct FormState {
    draft: Draft,
    errors: ErrorMap,
    submitting: bool,
}

pub struct ProductFormController {
    service: Arc<dyn CatalogService>,
    ui: Arc<dyn Ui>,
    listener: Arc<dyn ProductAdded>,
    state: Mutex<FormState>,
}

impl ProductFormController {
    pub fn new(
        service: Arc<dyn CatalogService>,
        ui: Arc<dyn Ui>,
        listener: Arc<dyn ProductAdded>,
    ) -> Self {
        Self {
            service,
            ui,
            listener,
            state: Mutex::new(FormState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn draft(&self) -> Draft {
        self.state().draft.clone()
    }

    /// Errors from the most recent submit.
    pub fn errors(&self) -> ErrorMap {
        self.state().errors.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().submitting
    }

    /// Store a value. No validation runs until `submit()`.
    ///
    /// `Field::Type` takes a variant name and behaves like [`Self::set_type`].
    pub fn update_field(&self, field: Field, value: impl Into<String>) -> DomainResult<()> {
        if field == Field::Type {
            let product_type: ProductType = value.into().parse()?;
            self.set_type(product_type);
            return Ok(());
        }
        self.state().draft.set(field, value)
    }

    /// Switch the variant. Values are kept; errors for fields the new
    /// variant does not use are dropped.
    pub fn set_type(&self, product_type: ProductType) {
        let mut state = self.state();
        state.draft.product_type = product_type;
        state.errors.retain_for(product_type);
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut state = self.state();
            if state.submitting {
                tracing::debug!("submit ignored: previous submit still pending");
                return SubmitOutcome::AlreadySubmitting;
            }
            match to_create_payload(&state.draft) {
                Ok(payload) => {
                    state.errors = ErrorMap::new();
                    state.submitting = true;
                    payload
                }
                Err(errors) => {
                    tracing::debug!(count = errors.len(), "product draft rejected");
                    state.errors = errors.clone();
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        let result = self.service.create(&payload).await;

        {
            let mut state = self.state();
            state.submitting = false;
            if result.is_ok() {
                state.draft = Draft::new();
            }
        }

        match result {
            Ok(ack) => {
                tracing::info!(
                    sku = %payload.sku,
                    product_type = %payload.product_type(),
                    "product added"
                );
                self.ui.notify(Notice::Info(ack.message.clone()));
                self.listener.product_added().await;
                self.ui.navigate(Route::ProductList);
                SubmitOutcome::Created(ack)
            }
            Err(err) => {
                tracing::error!(error = %err, "error adding product");
                self.ui.notify(Notice::Error(format!("Error adding product: {err}")));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Leave the form without saving.
    pub fn cancel(&self) {
        self.ui.navigate(Route::ProductList);
    }
}
