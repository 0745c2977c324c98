//! Storefront view state: filters, sort, and the cached projection.
//!
//! The reactive framework of the original storefront recomputed the visible
//! list implicitly whenever a dependency changed. Here the recompute is
//! explicit: every setter and every snapshot sync re-derives the projection
//! through [`project`]. There is no other way the visible list changes.

use glowcart_core::Product;

use crate::projector::{FilterSpec, SortOption, project};

/// The displayed slice of the catalog: latest snapshot plus current filter
/// and sort inputs, with the projection cached between changes.
#[derive(Debug, Default)]
pub struct StorefrontView {
    products: Vec<Product>,
    filters: FilterSpec,
    sort: SortOption,
    visible: Vec<Product>,
}

impl StorefrontView {
    /// Create an empty view with default filters (everything visible) and
    /// popularity ordering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the underlying snapshot and recompute.
    ///
    /// Call this from a store subscriber with the freshly notified list.
    pub fn sync(&mut self, products: &[Product]) {
        self.products = products.to_vec();
        self.recompute();
    }

    /// Replace the filter spec and recompute.
    pub fn set_filters(&mut self, filters: FilterSpec) {
        self.filters = filters;
        self.recompute();
    }

    /// Replace the sort option and recompute.
    pub fn set_sort_option(&mut self, sort: SortOption) {
        self.sort = sort;
        self.recompute();
    }

    /// The current projected list.
    #[must_use]
    pub fn visible(&self) -> &[Product] {
        &self.visible
    }

    /// The current filter spec.
    #[must_use]
    pub const fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    /// The current sort option.
    #[must_use]
    pub const fn sort_option(&self) -> SortOption {
        self.sort
    }

    fn recompute(&mut self) {
        self.visible = project(&self.products, &self.filters, self.sort);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use chrono::{TimeZone, Utc};
    use glowcart_core::{BrandTier, InventoryStatus, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, price: u32, brand: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            brand: brand.to_string(),
            brand_tier: BrandTier::A,
            category: "Toners".to_string(),
            price: Decimal::from(price),
            image: String::new(),
            inventory_status: InventoryStatus::InStock,
            is_pinned: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            benefits: None,
            how_to_use: None,
            stats: None,
        }
    }

    #[test]
    fn test_setters_recompute_projection() {
        let mut view = StorefrontView::new();
        assert!(view.visible().is_empty());

        view.sync(&[
            product("1", 30, "COSRX"),
            product("2", 10, "Laneige"),
            product("3", 20, "COSRX"),
        ]);
        assert_eq!(view.visible().len(), 3);

        view.set_filters(FilterSpec {
            brands: HashSet::from(["COSRX".to_string()]),
            ..FilterSpec::default()
        });
        assert_eq!(view.visible().len(), 2);

        view.set_sort_option(SortOption::PriceAsc);
        let ids: Vec<_> = view.visible().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["3", "1"]);
    }

    #[test]
    fn test_sync_reapplies_existing_inputs() {
        let mut view = StorefrontView::new();
        view.set_sort_option(SortOption::PriceDesc);
        view.sync(&[product("1", 10, "A"), product("2", 90, "A")]);

        let ids: Vec<_> = view.visible().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }
}
