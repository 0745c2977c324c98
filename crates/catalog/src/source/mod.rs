//! Product data sources.
//!
//! A [`ProductSource`] is the sole seam between the store and the outside
//! world: one fetch operation and the two admin mutations. The store never
//! trusts its own copy of pin state; after a mutation it re-fetches so the
//! source stays authoritative.

mod fixture;
mod http;

pub use fixture::FixtureSource;
pub use http::HttpSource;

use glowcart_core::{Product, ProductId};

use crate::error::{FetchError, UpdateError};

/// External provider of the product list and pin mutations.
#[allow(async_fn_in_trait)]
pub trait ProductSource {
    /// Fetch the full, pre-ranked product list.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the source is unreachable or the payload
    /// is malformed.
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Mark a product as pinned at the source.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError`] when the product is unknown or the source
    /// refuses the mutation.
    async fn pin_product(&self, id: &ProductId) -> Result<(), UpdateError>;

    /// Clear a product's pinned mark at the source.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError`] when the product is unknown or the source
    /// refuses the mutation.
    async fn unpin_product(&self, id: &ProductId) -> Result<(), UpdateError>;
}
