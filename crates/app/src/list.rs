//! Product list: fetch lifecycle, selection set and deletion.
//!
//! The controller owns the fetched list and the selection set; nobody else
//! mutates them. Every state change is published as a [`ListSnapshot`] on a
//! `watch` channel so a view can re-render from the latest state.
//!
//! Refreshes are last-started-wins: each request is tagged with a generation
//! and only the most recently initiated one may apply its result. Requests are
//! not sequenced beyond that, and nothing is cancelled; a late response for a
//! superseded request, or one arriving after `unmount()`, is dropped.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::watch;

use catalog_core::ProductId;
use catalog_products::Product;
use catalog_service::{CatalogService, Listing, ServiceError};

use crate::form::ProductAdded;
use crate::ui::{Notice, Ui};

const NOTHING_SELECTED: &str = "Select at least one product.";

/// Fetch lifecycle of the list.
///
/// Failed fetches fail soft into `Loaded` with an empty list; the cause is kept
/// in [`ListSnapshot::last_failure`] and logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
}

/// Everything a list view needs to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSnapshot {
    pub phase: ListPhase,
    pub products: Vec<Product>,
    pub selection: BTreeSet<ProductId>,
    /// Diagnostic for the last refresh that fell back to an empty list.
    pub last_failure: Option<String>,
}

impl ListSnapshot {
    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The service confirmed deletion of this many products.
    Deleted(usize),
    /// The user declined the confirmation.
    Cancelled,
    /// Batch delete with an empty selection; no call was made.
    NothingSelected,
    Failed(ServiceError),
}

#[derive(Debug)]
struct ListState {
    snapshot: ListSnapshot,
    latest_request: u64,
    mounted: bool,
}

pub struct ProductListController {
    service: Arc<dyn CatalogService>,
    ui: Arc<dyn Ui>,
    state: Mutex<ListState>,
    updates: watch::Sender<ListSnapshot>,
}

impl ProductListController {
    pub fn new(service: Arc<dyn CatalogService>, ui: Arc<dyn Ui>) -> Self {
        let (updates, _) = watch::channel(ListSnapshot::default());
        Self {
            service,
            ui,
            state: Mutex::new(ListState {
                snapshot: ListSnapshot::default(),
                latest_request: 0,
                mounted: true,
            }),
            updates,
        }
    }

    fn state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &ListState) {
        self.updates.send_replace(state.snapshot.clone());
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.updates.subscribe()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.state().snapshot.clone()
    }

    pub fn phase(&self) -> ListPhase {
        self.state().snapshot.phase
    }

    pub fn is_loading(&self) -> bool {
        self.state().snapshot.is_loading()
    }

    pub fn products(&self) -> Vec<Product> {
        self.state().snapshot.products.clone()
    }

    pub fn selection(&self) -> BTreeSet<ProductId> {
        self.state().snapshot.selection.clone()
    }

    pub fn is_selected(&self, id: &ProductId) -> bool {
        self.state().snapshot.selection.contains(id)
    }

    /// Attach the view and load the list.
    pub async fn mount(&self) {
        self.state().mounted = true;
        self.refresh().await;
    }

    /// Detach the view. Responses still in flight are discarded on arrival.
    pub fn unmount(&self) {
        self.state().mounted = false;
        tracing::debug!("product list unmounted");
    }

    /// Reload the list from the catalog service.
    ///
    /// Never fails: a malformed body or a transport failure leaves an empty,
    /// loaded list and a logged diagnostic.
    pub async fn refresh(&self) {
        let request = {
            let mut state = self.state();
            if !state.mounted {
                tracing::debug!("refresh skipped: product list is not mounted");
                return;
            }
            state.latest_request += 1;
            state.snapshot.phase = ListPhase::Loading;
            self.publish(&state);
            state.latest_request
        };

        let result = self.service.list().await;

        let mut state = self.state();
        if !state.mounted {
            tracing::debug!(request, "discarding list response: product list unmounted");
            return;
        }
        if state.latest_request != request {
            tracing::debug!(
                request,
                latest = state.latest_request,
                "discarding list response superseded by a newer refresh"
            );
            return;
        }

        let (products, failure) = match result {
            Ok(Listing::Products(products)) => (products, None),
            Ok(Listing::Malformed(body)) => {
                tracing::error!(response = %body, "invalid response from catalog service");
                (Vec::new(), Some("invalid response from catalog service".to_string()))
            }
            Err(err) => {
                tracing::error!(error = %err, "error fetching products");
                (Vec::new(), Some(err.to_string()))
            }
        };

        let snapshot = &mut state.snapshot;
        let selected_before = snapshot.selection.len();
        snapshot
            .selection
            .retain(|id| products.iter().any(|p| &p.id == id));
        if snapshot.selection.len() != selected_before {
            tracing::debug!(
                pruned = selected_before - snapshot.selection.len(),
                "pruned selection entries no longer listed"
            );
        }
        snapshot.products = products;
        snapshot.phase = ListPhase::Loaded;
        snapshot.last_failure = failure;
        tracing::debug!(count = snapshot.products.len(), "product list loaded");

        self.publish(&state);
    }

    /// Flip selection of `id`. Returns whether it is selected afterwards.
    ///
    /// Ids that are not in the current list cannot be selected, only deselected.
    pub fn toggle_select(&self, id: &ProductId) -> bool {
        let mut state = self.state();
        let selected = if state.snapshot.selection.remove(id) {
            false
        } else if state.snapshot.products.iter().any(|p| &p.id == id) {
            state.snapshot.selection.insert(id.clone());
            true
        } else {
            tracing::debug!(%id, "ignoring selection of unlisted product");
            return false;
        };
        self.publish(&state);
        selected
    }

    /// Delete one product after user confirmation, then refresh.
    pub async fn delete_one(&self, id: ProductId) -> DeleteOutcome {
        self.delete_confirmed(vec![id]).await
    }

    /// Delete every selected product after user confirmation, then refresh.
    pub async fn delete_selected(&self) -> DeleteOutcome {
        let ids: Vec<ProductId> = self.state().snapshot.selection.iter().cloned().collect();
        if ids.is_empty() {
            self.ui.notify(Notice::Info(NOTHING_SELECTED.to_string()));
            return DeleteOutcome::NothingSelected;
        }
        self.delete_confirmed(ids).await
    }

    async fn delete_confirmed(&self, ids: Vec<ProductId>) -> DeleteOutcome {
        let prompt = format!("Are you sure you want to delete {} product(s)?", ids.len());
        if !self.ui.confirm(&prompt) {
            tracing::debug!(count = ids.len(), "deletion cancelled by user");
            return DeleteOutcome::Cancelled;
        }

        if let Err(err) = self.service.delete(&ids).await {
            tracing::error!(error = %err, count = ids.len(), "cannot delete products");
            self.ui.notify(Notice::Error(format!("Failed to delete products: {err}")));
            return DeleteOutcome::Failed(err);
        }

        tracing::info!(count = ids.len(), "products deleted");
        {
            let mut state = self.state();
            for id in &ids {
                state.snapshot.selection.remove(id);
            }
            self.publish(&state);
        }
        self.refresh().await;
        DeleteOutcome::Deleted(ids.len())
    }
}

#[async_trait]
impl ProductAdded for ProductListController {
    async fn product_added(&self) {
        self.refresh().await;
    }
}
