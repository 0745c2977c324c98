//! In-memory fixture source backed by bundled or on-disk JSON.
//!
//! This is the demo's mocked data fetching: the bundled dataset mirrors a
//! small K-beauty catalog, pre-ranked by popularity. Pin state is held in
//! memory so a pin followed by a refresh observes the mutation, and fetch
//! failures can be injected to exercise the store's error paths.

use std::path::Path;
use std::sync::Mutex;

use glowcart_core::{Product, ProductId};

use super::ProductSource;
use crate::error::{FetchError, UpdateError};

/// The catalog dataset shipped with the demo.
const BUNDLED_PRODUCTS: &str = include_str!("../../fixtures/products.json");

/// Product source serving an in-memory list.
pub struct FixtureSource {
    state: Mutex<FixtureState>,
}

struct FixtureState {
    products: Vec<Product>,
    fail_fetches: bool,
}

impl FixtureSource {
    /// Create a source over an explicit product list.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            state: Mutex::new(FixtureState {
                products,
                fail_fetches: false,
            }),
        }
    }

    /// Create a source serving the bundled demo catalog.
    ///
    /// # Panics
    ///
    /// Panics if the bundled dataset fails to parse, which would be a
    /// packaging defect.
    #[must_use]
    pub fn bundled() -> Self {
        let products: Vec<Product> =
            serde_json::from_str(BUNDLED_PRODUCTS).expect("bundled fixture data is valid JSON");
        Self::with_products(products)
    }

    /// Create a source from a JSON file holding an array of products.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Io`] when the file cannot be read and
    /// [`FetchError::Parse`] when it does not hold a product array.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let raw = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        Ok(Self::with_products(products))
    }

    /// Toggle injected fetch failures.
    ///
    /// While enabled, every `fetch_products` call reports the source as
    /// unavailable; mutations still succeed.
    pub fn set_fail_fetches(&self, fail: bool) {
        self.lock().fail_fetches = fail;
    }

    /// Replace the upstream list wholesale, e.g. to simulate a feed update
    /// that does not carry a locally observed pin yet.
    pub fn replace_products(&self, products: Vec<Product>) {
        self.lock().products = products;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FixtureState> {
        self.state.lock().expect("fixture state mutex poisoned")
    }

    fn set_pinned(&self, id: &ProductId, pinned: bool) -> Result<(), UpdateError> {
        let mut state = self.lock();
        let product = state
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| UpdateError::UnknownProduct(id.clone()))?;
        product.is_pinned = pinned;
        Ok(())
    }
}

impl ProductSource for FixtureSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let state = self.lock();
        if state.fail_fetches {
            return Err(FetchError::Unavailable(
                "injected fixture outage".to_string(),
            ));
        }
        Ok(state.products.clone())
    }

    async fn pin_product(&self, id: &ProductId) -> Result<(), UpdateError> {
        self.set_pinned(id, true)
    }

    async fn unpin_product(&self, id: &ProductId) -> Result<(), UpdateError> {
        self.set_pinned(id, false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bundled_catalog_parses_and_serves() {
        let source = FixtureSource::bundled();
        let products = source.fetch_products().await.unwrap();
        assert!(products.len() >= 8);

        // Snapshot invariant: ids are unique.
        let mut ids: Vec<_> = products.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }

    #[tokio::test]
    async fn test_pin_round_trips_through_fetch() {
        let source = FixtureSource::bundled();
        let before = source.fetch_products().await.unwrap();
        let target = before.first().unwrap().id.clone();

        source.pin_product(&target).await.unwrap();
        let after = source.fetch_products().await.unwrap();
        let pinned = after.iter().find(|p| p.id == target).unwrap();
        assert!(pinned.is_pinned);

        source.unpin_product(&target).await.unwrap();
        let after = source.fetch_products().await.unwrap();
        assert!(!after.iter().find(|p| p.id == target).unwrap().is_pinned);
    }

    #[tokio::test]
    async fn test_unknown_product_is_rejected() {
        let source = FixtureSource::with_products(Vec::new());
        let err = source
            .pin_product(&ProductId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateError::UnknownProduct(_)));
    }

    #[tokio::test]
    async fn test_injected_outage_fails_fetch_only() {
        let source = FixtureSource::bundled();
        let target = source.fetch_products().await.unwrap()[0].id.clone();

        source.set_fail_fetches(true);
        assert!(matches!(
            source.fetch_products().await,
            Err(FetchError::Unavailable(_))
        ));
        // Mutations are a separate endpoint and keep working.
        source.pin_product(&target).await.unwrap();

        source.set_fail_fetches(false);
        assert!(source.fetch_products().await.is_ok());
    }
}
