//! Error types for catalog operations.
//!
//! Two public kinds cross the store boundary: [`FetchError`] when the data
//! source is unreachable or malformed, and [`UpdateError`] when a pin/unpin
//! mutation is rejected. Both are recovered at the store: the last-known-good
//! list is retained and the error is surfaced as state, never as a panic.

use glowcart_core::ProductId;
use thiserror::Error;

/// The data source could not produce a product list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure reaching the source.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body for diagnostics.
        message: String,
    },

    /// The source is throttling us.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The source answered but the payload did not parse.
    #[error("Malformed product feed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading a local fixture file failed.
    #[error("Fixture I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source reported itself unavailable.
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// A pin/unpin mutation was not applied.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The source does not know the product.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// The source refused the mutation.
    #[error("Update rejected: {0}")]
    Rejected(String),

    /// The mutation request never reached the source.
    #[error("Update transport failed: {0}")]
    Transport(#[source] FetchError),

    /// The source applied the mutation but the follow-up refresh failed;
    /// the store keeps its previous list until the next refresh converges.
    #[error("Update applied but resync failed: {0}")]
    Resync(#[source] FetchError),
}
