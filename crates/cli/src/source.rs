//! Source selection: one concrete type over the configured backends.

use glowcart_catalog::{FetchError, FixtureSource, HttpSource, ProductSource, UpdateError};
use glowcart_core::{Product, ProductId};

use crate::config::{CliConfig, SourceSpec};

/// The product source picked by configuration.
pub enum AppSource {
    /// Bundled or on-disk JSON fixture.
    Fixture(FixtureSource),
    /// Remote catalog API.
    Http(HttpSource),
}

impl AppSource {
    /// Build the source described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when a fixture file cannot be loaded.
    pub fn from_config(config: &CliConfig) -> Result<Self, FetchError> {
        match &config.source {
            SourceSpec::Fixture => Ok(Self::Fixture(FixtureSource::bundled())),
            SourceSpec::Path(path) => Ok(Self::Fixture(FixtureSource::from_path(path)?)),
            SourceSpec::Url(url) => Ok(Self::Http(HttpSource::new(
                url.clone(),
                config.api_token.clone(),
            ))),
        }
    }
}

impl ProductSource for AppSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        match self {
            Self::Fixture(source) => source.fetch_products().await,
            Self::Http(source) => source.fetch_products().await,
        }
    }

    async fn pin_product(&self, id: &ProductId) -> Result<(), UpdateError> {
        match self {
            Self::Fixture(source) => source.pin_product(id).await,
            Self::Http(source) => source.pin_product(id).await,
        }
    }

    async fn unpin_product(&self, id: &ProductId) -> Result<(), UpdateError> {
        match self {
            Self::Fixture(source) => source.unpin_product(id).await,
            Self::Http(source) => source.unpin_product(id).await,
        }
    }
}
