//! Integration tests for Glowcart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p glowcart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_flow` - Store refresh/pin flows composed with the projection
//!
//! The tests run entirely against [`glowcart_catalog::FixtureSource`]; no
//! network or external services are involved. This crate also exports the
//! shared product builder the test files use.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{TimeZone, Utc};
use glowcart_catalog::{FixtureSource, ProductStore};
use glowcart_core::{BrandTier, InventoryStatus, Product, ProductId, ProductStats};
use rust_decimal::Decimal;

/// Build a minimal product for test scenarios.
///
/// # Panics
///
/// Never in practice; the fixed timestamp is always valid.
#[must_use]
pub fn product(id: &str, price: u32, brand: &str, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: String::new(),
        brand: brand.to_string(),
        brand_tier: BrandTier::B,
        category: category.to_string(),
        price: Decimal::from(price),
        image: String::new(),
        inventory_status: InventoryStatus::InStock,
        is_pinned: false,
        created_at: Utc
            .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp"),
        benefits: None,
        how_to_use: None,
        stats: None,
    }
}

/// Attach merchandising stats to a product.
#[must_use]
pub fn with_stats(mut product: Product, views: u64, sold: u64) -> Product {
    product.stats = Some(ProductStats {
        cogs: Decimal::ONE,
        days_of_inventory: 30,
        units_in_stock: 100,
        views_last_month: views,
        volume_sold_last_month: sold,
    });
    product
}

/// A store over the bundled demo catalog.
#[must_use]
pub fn bundled_store() -> ProductStore<FixtureSource> {
    ProductStore::new(FixtureSource::bundled())
}

/// A store over an explicit product list.
#[must_use]
pub fn store_with(products: Vec<Product>) -> ProductStore<FixtureSource> {
    ProductStore::new(FixtureSource::with_products(products))
}
