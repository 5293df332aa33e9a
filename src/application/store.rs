//! Reactive product store
//!
//! Owns the cached product list and every derived view. All writes go
//! through named methods on one owned object; collaborators get
//! read-only snapshots or `watch` subscriptions. The store trusts only
//! server-confirmed state: each successful write is followed by exactly
//! one full re-fetch, never a local patch.

use std::sync::Arc;

use tokio::sync::{broadcast, watch, RwLock};
use tokio_stream::wrappers::{BroadcastStream, WatchStream};
use tracing::{debug, info, warn};

use crate::application::listing;
use crate::domain::events::StoreEvent;
use crate::domain::gateway::{CatalogError, CatalogGateway};
use crate::domain::product::Product;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct StoreState {
    all: Vec<Product>,
    filtered: Vec<Product>,
    search_term: String,
    page_size: usize,
    selected: Option<Product>,
}

/// In-memory authoritative cache of the catalog plus derived views.
pub struct ProductStore {
    gateway: Arc<dyn CatalogGateway>,
    state: RwLock<StoreState>,
    all_tx: watch::Sender<Vec<Product>>,
    filtered_tx: watch::Sender<Vec<Product>>,
    visible_tx: watch::Sender<Vec<Product>>,
    selected_tx: watch::Sender<Option<Product>>,
    events_tx: broadcast::Sender<StoreEvent>,
}

impl ProductStore {
    /// Build the store and seed `all`/`filtered` with one initial fetch.
    pub async fn connect(
        gateway: Arc<dyn CatalogGateway>,
        page_size: usize,
    ) -> Result<Self, CatalogError> {
        let all = gateway.fetch_all().await?;
        info!(count = all.len(), "catalog store seeded");

        let visible = listing::first_page(&all, page_size);
        let (all_tx, _) = watch::channel(all.clone());
        let (filtered_tx, _) = watch::channel(all.clone());
        let (visible_tx, _) = watch::channel(visible);
        let (selected_tx, _) = watch::channel(None);
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let state = StoreState {
            filtered: all.clone(),
            all,
            search_term: String::new(),
            page_size,
            selected: None,
        };

        Ok(Self {
            gateway,
            state: RwLock::new(state),
            all_tx,
            filtered_tx,
            visible_tx,
            selected_tx,
            events_tx,
        })
    }

    /// Re-fetch the full list from the backend, replacing both caches.
    ///
    /// Any active search term is dropped; the view returns to the
    /// unfiltered first page.
    pub async fn refresh(&self) -> Result<usize, CatalogError> {
        let fresh = self.gateway.fetch_all().await?;
        let count = fresh.len();

        let mut state = self.state.write().await;
        state.all = fresh;
        state.filtered = state.all.clone();
        state.search_term.clear();
        self.publish_lists(&state);
        drop(state);

        self.emit(StoreEvent::Refreshed { count });
        Ok(count)
    }

    /// Recompute the filtered view by case-insensitive name match. Pure
    /// over the cache: no network traffic, `all` untouched, idempotent.
    pub async fn search(&self, term: &str) {
        let mut state = self.state.write().await;
        state.filtered = listing::filter_by_name(&state.all, term);
        state.search_term = term.to_string();
        let matches = state.filtered.len();
        self.publish_lists(&state);
        drop(state);

        debug!(term, matches, "search applied");
        self.emit(StoreEvent::SearchApplied {
            term: term.to_string(),
            matches,
        });
    }

    /// Change the page size. The visible slice always restarts from the
    /// first page of the current filtered list.
    pub async fn set_page_size(&self, page_size: usize) {
        let mut state = self.state.write().await;
        state.page_size = page_size;
        self.publish_lists(&state);
        drop(state);

        self.emit(StoreEvent::PageSizeChanged { size: page_size });
    }

    /// Target a product for an in-progress edit/delete, or clear it.
    /// Re-selecting the current state is a no-op and emits nothing.
    pub async fn select(&self, product: Option<Product>) {
        let mut state = self.state.write().await;
        if state.selected == product {
            return;
        }
        state.selected = product.clone();
        self.selected_tx.send_replace(product.clone());
        drop(state);

        self.emit(StoreEvent::SelectionChanged { selected: product });
    }

    pub async fn clear_selection(&self) {
        self.select(None).await;
    }

    /// Create a product, then re-fetch the confirmed list.
    pub async fn create(&self, product: Product) -> Result<Product, CatalogError> {
        let created = self.gateway.create(&product).await?;
        info!(id = %created.id, "product created");
        self.refresh().await?;
        self.clear_selection().await;
        self.emit(StoreEvent::Created {
            id: created.id.clone(),
        });
        Ok(created)
    }

    /// Update a product, then re-fetch the confirmed list.
    pub async fn update(&self, product: Product) -> Result<Product, CatalogError> {
        let updated = self.gateway.update(&product).await?;
        info!(id = %updated.id, "product updated");
        self.refresh().await?;
        self.clear_selection().await;
        self.emit(StoreEvent::Updated {
            id: updated.id.clone(),
        });
        Ok(updated)
    }

    /// Delete the currently selected product. With nothing selected this
    /// is an explicit no-op: `Ok(None)`, zero network calls.
    pub async fn delete(&self) -> Result<Option<Product>, CatalogError> {
        let selected = { self.state.read().await.selected.clone() };
        let Some(target) = selected else {
            warn!("delete requested with no product selected");
            return Ok(None);
        };

        let removed = self.gateway.delete(&target.id).await?;
        info!(id = %removed.id, "product deleted");
        self.refresh().await?;
        self.clear_selection().await;
        self.emit(StoreEvent::Deleted {
            id: removed.id.clone(),
        });
        Ok(Some(removed))
    }

    // ----- read-only views -----

    pub async fn snapshot_all(&self) -> Vec<Product> {
        self.state.read().await.all.clone()
    }

    pub async fn snapshot_filtered(&self) -> Vec<Product> {
        self.state.read().await.filtered.clone()
    }

    /// The slice currently on screen: first page of the filtered list.
    pub async fn snapshot_visible(&self) -> Vec<Product> {
        let state = self.state.read().await;
        listing::first_page(&state.filtered, state.page_size)
    }

    pub async fn selected(&self) -> Option<Product> {
        self.state.read().await.selected.clone()
    }

    pub async fn search_term(&self) -> String {
        self.state.read().await.search_term.clone()
    }

    pub async fn page_size(&self) -> usize {
        self.state.read().await.page_size
    }

    /// Subscribe to the full cached list. Drop the receiver when the
    /// owning scope ends; nothing else holds the subscription alive.
    pub fn subscribe_all(&self) -> watch::Receiver<Vec<Product>> {
        self.all_tx.subscribe()
    }

    pub fn subscribe_filtered(&self) -> watch::Receiver<Vec<Product>> {
        self.filtered_tx.subscribe()
    }

    pub fn subscribe_visible(&self) -> watch::Receiver<Vec<Product>> {
        self.visible_tx.subscribe()
    }

    pub fn subscribe_selected(&self) -> watch::Receiver<Option<Product>> {
        self.selected_tx.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.events_tx.subscribe()
    }

    /// Stream view over the filtered list for `StreamExt` consumers.
    pub fn filtered_stream(&self) -> WatchStream<Vec<Product>> {
        WatchStream::new(self.filtered_tx.subscribe())
    }

    /// Stream view over store events; a lagging consumer yields an error
    /// item instead of stalling the store.
    pub fn events_stream(&self) -> BroadcastStream<StoreEvent> {
        BroadcastStream::new(self.events_tx.subscribe())
    }

    fn publish_lists(&self, state: &StoreState) {
        self.all_tx.send_replace(state.all.clone());
        self.filtered_tx.send_replace(state.filtered.clone());
        self.visible_tx
            .send_replace(listing::first_page(&state.filtered, state.page_size));
    }

    fn emit(&self, event: StoreEvent) {
        // No receivers is fine; events are best-effort notifications.
        let _ = self.events_tx.send(event);
    }
}
