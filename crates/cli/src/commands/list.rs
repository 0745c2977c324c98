//! Storefront listing: the product grid as a table.
//!
//! # Usage
//!
//! ```bash
//! # Everything, pre-ranked by popularity
//! glowcart list
//!
//! # Cheap COSRX toners and essences, cheapest first
//! glowcart list --brand COSRX --category Toners --category Essences \
//!     --max-price 30 --sort price-asc
//! ```

#![allow(clippy::print_stdout)] // table output is the command's purpose

use std::collections::HashSet;

use glowcart_catalog::{FilterSpec, PriceRange, ProductStore, SortOption, StorefrontView};
use rust_decimal::Decimal;

use crate::source::AppSource;

/// Filter and sort selections from the command line.
pub struct ListArgs {
    /// Brands to keep; empty keeps all.
    pub brands: Vec<String>,
    /// Categories to keep; empty keeps all.
    pub categories: Vec<String>,
    /// Lower price bound; defaults to the slider minimum.
    pub min_price: Option<Decimal>,
    /// Upper price bound; defaults to the slider maximum.
    pub max_price: Option<Decimal>,
    /// Sort option.
    pub sort: SortOption,
}

/// Fetch the catalog and print the projected product grid.
///
/// # Errors
///
/// Returns an error when the initial fetch fails.
pub async fn run(
    store: &ProductStore<AppSource>,
    args: ListArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    store.refresh().await?;

    let mut view = StorefrontView::new();
    view.set_sort_option(args.sort);
    view.set_filters(build_filters(&args));
    view.sync(&store.products());

    if view.visible().is_empty() {
        println!("No products match the current filters.");
        return Ok(());
    }

    println!(
        "{:<4} {:<42} {:<12} {:>8}  {:<12}",
        "#", "Product", "Brand", "Price", "Availability"
    );
    for (index, product) in view.visible().iter().enumerate() {
        let pin = if product.is_pinned { " *" } else { "" };
        println!(
            "{:<4} {:<42} {:<12} {:>8}  {:<12}{pin}",
            index + 1,
            truncate(&product.name, 42),
            truncate(&product.brand, 12),
            format!("${}", product.price),
            product.inventory_status.to_string(),
        );
    }

    Ok(())
}

fn build_filters(args: &ListArgs) -> FilterSpec {
    let defaults = PriceRange::default();
    FilterSpec {
        brands: args.brands.iter().cloned().collect::<HashSet<_>>(),
        categories: args.categories.iter().cloned().collect::<HashSet<_>>(),
        price_range: PriceRange::new(
            args.min_price.unwrap_or(defaults.min),
            args.max_price.unwrap_or(defaults.max),
        ),
    }
}

pub(crate) fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit.saturating_sub(1)).collect();
        format!("{cut}\u{2026}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filters_defaults_to_slider_range() {
        let args = ListArgs {
            brands: vec!["COSRX".to_string()],
            categories: Vec::new(),
            min_price: None,
            max_price: None,
            sort: SortOption::Popularity,
        };
        let filters = build_filters(&args);
        assert_eq!(filters.price_range, PriceRange::default());
        assert!(filters.brands.contains("COSRX"));
        assert!(filters.categories.is_empty());
    }

    #[test]
    fn test_build_filters_applies_explicit_bounds() {
        let args = ListArgs {
            brands: Vec::new(),
            categories: Vec::new(),
            min_price: Some(Decimal::from(10)),
            max_price: Some(Decimal::from(40)),
            sort: SortOption::PriceAsc,
        };
        let filters = build_filters(&args);
        assert_eq!(
            filters.price_range,
            PriceRange::new(Decimal::from(10), Decimal::from(40))
        );
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("0123456789abc", 10), "012345678\u{2026}");
    }
}
