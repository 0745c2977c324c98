//! The authoritative product store for the current session.
//!
//! The store owns the last fetched list, the user-visible error state, and
//! an explicit subscriber list. State lives behind a mutex that is never
//! held across an await: a refresh fetches first, then commits. Overlapping
//! refreshes are therefore permitted and resolve last-writer-wins, with a
//! monotonic version counter making the commit order observable.

use std::sync::Mutex;

use glowcart_core::{Product, ProductId};

use crate::error::{FetchError, UpdateError};
use crate::source::ProductSource;

/// Handle returned by [`ProductStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn Fn(&[Product]) + Send + Sync>;

/// Holds the product list for the current session and keeps it in sync with
/// a [`ProductSource`].
///
/// All methods take `&self`; the store is safe to share behind an `Arc`.
pub struct ProductStore<S> {
    source: S,
    state: Mutex<StoreState>,
    subscribers: Mutex<SubscriberList>,
}

struct StoreState {
    products: Vec<Product>,
    last_error: Option<String>,
    loading: bool,
    version: u64,
}

#[derive(Default)]
struct SubscriberList {
    next_id: u64,
    entries: Vec<(SubscriberId, Subscriber)>,
}

impl<S: ProductSource> ProductStore<S> {
    /// Create an empty store over a source. No fetch happens until the
    /// first [`refresh`](Self::refresh).
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(StoreState {
                products: Vec::new(),
                last_error: None,
                loading: false,
                version: 0,
            }),
            subscribers: Mutex::new(SubscriberList::default()),
        }
    }

    /// Replace the held list wholesale from the source.
    ///
    /// On success the error state clears, the version counter bumps, and
    /// every subscriber is notified exactly once, synchronously, with the
    /// full new list. On failure the previous list is retained and the
    /// error is recorded for [`last_error`](Self::last_error); subscribers
    /// are not notified.
    ///
    /// # Errors
    ///
    /// Returns the source's [`FetchError`]. The store stays usable.
    pub async fn refresh(&self) -> Result<Vec<Product>, FetchError> {
        self.state_mut(|state| state.loading = true);

        // Suspend point: the state lock is not held across the fetch, so a
        // competing refresh can land first. Whichever commits last wins.
        let fetched = self.source.fetch_products().await;

        match fetched {
            Ok(products) => {
                let version = self.state_mut(|state| {
                    state.products = products.clone();
                    state.last_error = None;
                    state.loading = false;
                    state.version += 1;
                    state.version
                });
                tracing::debug!(count = products.len(), version, "catalog refreshed");
                self.notify(&products);
                Ok(products)
            }
            Err(err) => {
                tracing::warn!(error = %err, "catalog refresh failed, keeping previous list");
                self.state_mut(|state| {
                    state.loading = false;
                    state.last_error = Some(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Pin a product at the source, then refresh so the held list reflects
    /// source-of-truth rather than the optimistic local intent.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError`] when the source rejects the mutation (state
    /// is unchanged) or as [`UpdateError::Resync`] when the mutation stuck
    /// but the follow-up refresh failed.
    pub async fn pin(&self, id: &ProductId) -> Result<(), UpdateError> {
        self.source.pin_product(id).await?;
        self.refresh().await.map_err(UpdateError::Resync)?;
        Ok(())
    }

    /// Unpin a product at the source, then refresh.
    ///
    /// # Errors
    ///
    /// Same contract as [`pin`](Self::pin).
    pub async fn unpin(&self, id: &ProductId) -> Result<(), UpdateError> {
        self.source.unpin_product(id).await?;
        self.refresh().await.map_err(UpdateError::Resync)?;
        Ok(())
    }

    /// Register a callback invoked with the full new list after every
    /// successful refresh.
    pub fn subscribe(&self, callback: impl Fn(&[Product]) + Send + Sync + 'static) -> SubscriberId {
        let mut subscribers = self.subscribers_mut();
        let id = SubscriberId(subscribers.next_id);
        subscribers.next_id += 1;
        subscribers.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers_mut();
        let before = subscribers.entries.len();
        subscribers.entries.retain(|(sid, _)| *sid != id);
        subscribers.entries.len() < before
    }

    /// Snapshot of the held list.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.state(|state| state.products.clone())
    }

    /// The error from the most recent failed operation, cleared by the next
    /// successful refresh.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state(|state| state.last_error.clone())
    }

    /// Whether a refresh is currently in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state(|state| state.loading)
    }

    /// Monotonic counter of committed refreshes.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.state(|state| state.version)
    }

    /// Access the underlying source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    fn notify(&self, products: &[Product]) {
        let subscribers = self.subscribers_mut();
        for (_, callback) in &subscribers.entries {
            callback(products);
        }
    }

    fn state<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        let state = self.state.lock().expect("store state mutex poisoned");
        f(&state)
    }

    fn state_mut<T>(&self, f: impl FnOnce(&mut StoreState) -> T) -> T {
        let mut state = self.state.lock().expect("store state mutex poisoned");
        f(&mut state)
    }

    fn subscribers_mut(&self) -> std::sync::MutexGuard<'_, SubscriberList> {
        self.subscribers
            .lock()
            .expect("subscriber list mutex poisoned")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::source::FixtureSource;

    fn store() -> ProductStore<FixtureSource> {
        ProductStore::new(FixtureSource::bundled())
    }

    #[tokio::test]
    async fn test_refresh_replaces_list_and_bumps_version() {
        let store = store();
        assert_eq!(store.version(), 0);
        assert!(store.products().is_empty());

        let products = store.refresh().await.unwrap();
        assert!(!products.is_empty());
        assert_eq!(store.products(), products);
        assert_eq!(store.version(), 1);
        assert!(store.last_error().is_none());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_known_good_list() {
        let store = store();
        let good = store.refresh().await.unwrap();

        store.source().set_fail_fetches(true);
        let err = store.refresh().await.unwrap_err();
        assert!(matches!(err, FetchError::Unavailable(_)));

        // Previous list retained, error surfaced, no version bump.
        assert_eq!(store.products(), good);
        assert_eq!(store.version(), 1);
        assert!(store.last_error().is_some());

        // The next successful refresh clears the error flag.
        store.source().set_fail_fetches(false);
        store.refresh().await.unwrap();
        assert!(store.last_error().is_none());
        assert_eq!(store.version(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_notified_once_per_successful_refresh() {
        let store = store();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let id = store.subscribe(move |products| {
            assert!(!products.is_empty());
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.refresh().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.source().set_fail_fetches(true);
        let _ = store.refresh().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.source().set_fail_fetches(false);
        store.refresh().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(store.unsubscribe(id));
        store.refresh().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!store.unsubscribe(id));
    }

    #[tokio::test]
    async fn test_pin_resynchronizes_from_source() {
        let store = store();
        let products = store.refresh().await.unwrap();
        let target = products.first().unwrap().id.clone();

        store.pin(&target).await.unwrap();
        let pinned = store
            .products()
            .into_iter()
            .find(|p| p.id == target)
            .unwrap();
        assert!(pinned.is_pinned);
        // pin() committed a second refresh.
        assert_eq!(store.version(), 2);

        store.unpin(&target).await.unwrap();
        let unpinned = store
            .products()
            .into_iter()
            .find(|p| p.id == target)
            .unwrap();
        assert!(!unpinned.is_pinned);
    }

    #[tokio::test]
    async fn test_rejected_pin_leaves_state_unchanged() {
        let store = store();
        let before = store.refresh().await.unwrap();

        let err = store.pin(&ProductId::new("no-such-id")).await.unwrap_err();
        assert!(matches!(err, UpdateError::UnknownProduct(_)));
        assert_eq!(store.products(), before);
        assert_eq!(store.version(), 1);
    }

    #[tokio::test]
    async fn test_pin_resync_failure_is_distinguished() {
        let store = store();
        let products = store.refresh().await.unwrap();
        let target = products.first().unwrap().id.clone();

        // The mutation lands, but the follow-up fetch is down.
        store.source().set_fail_fetches(true);
        let err = store.pin(&target).await.unwrap_err();
        assert!(matches!(err, UpdateError::Resync(_)));

        // Held list still the pre-pin snapshot; the next timer tick converges.
        let held = store
            .products()
            .into_iter()
            .find(|p| p.id == target)
            .unwrap();
        assert!(!held.is_pinned);
        assert!(store.last_error().is_some());
    }

    #[tokio::test]
    async fn test_stale_refresh_wins_over_optimistic_pin() {
        // The accepted race: a refresh returning a feed without the pin
        // reflects source-of-truth, not the local intent.
        let store = store();
        let baseline = store.refresh().await.unwrap();
        let target = baseline.first().unwrap().id.clone();

        store.pin(&target).await.unwrap();
        assert!(
            store
                .products()
                .into_iter()
                .find(|p| p.id == target)
                .unwrap()
                .is_pinned
        );

        // Upstream replaces the feed without the pin; the next refresh wins.
        store.source().replace_products(baseline.clone());
        store.refresh().await.unwrap();
        assert!(
            !store
                .products()
                .into_iter()
                .find(|p| p.id == target)
                .unwrap()
                .is_pinned
        );
    }
}
