//! Admin dashboard and pin management.
//!
//! # Usage
//!
//! ```bash
//! # Ranked product table with merchandising stats
//! glowcart admin dashboard
//!
//! # Narrow the table by name or brand
//! glowcart admin dashboard --search snail
//!
//! # Feature a product / clear the feature mark
//! glowcart admin pin laneige-lip-sleeping-mask
//! glowcart admin unpin laneige-lip-sleeping-mask
//! ```
//!
//! Pin state is cosmetic in ranking: the dashboard shows a marker, the
//! storefront ordering is untouched.

#![allow(clippy::print_stdout)] // table output is the command's purpose

use glowcart_catalog::ProductStore;
use glowcart_core::{Product, ProductId};

use crate::commands::list::truncate;
use crate::source::AppSource;

/// Fetch the catalog and print the admin product table, rank order first.
///
/// # Errors
///
/// Returns an error when the fetch fails.
pub async fn dashboard(
    store: &ProductStore<AppSource>,
    search: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    store.refresh().await?;
    let products = store.products();

    let rows: Vec<&Product> = match &search {
        Some(term) => products.iter().filter(|p| matches_search(p, term)).collect(),
        None => products.iter().collect(),
    };

    if rows.is_empty() {
        println!("No products found");
        return Ok(());
    }

    println!(
        "{:<5} {:<38} {:<14} {:<12} {:>8} {:>8} {:>6}  {}",
        "Rank", "Product", "Category", "Brand", "Price", "Views", "Sold", "Pinned"
    );
    for (index, product) in rows.iter().enumerate() {
        println!(
            "#{:<4} {:<38} {:<14} {:<12} {:>8} {:>8} {:>6}  {}",
            index + 1,
            truncate(&product.name, 38),
            truncate(&product.category, 14),
            format!("{} ({})", truncate(&product.brand, 8), product.brand_tier),
            format!("${}", product.price),
            stat(product.stats.as_ref().map(|s| s.views_last_month)),
            stat(product.stats.as_ref().map(|s| s.volume_sold_last_month)),
            if product.is_pinned { "yes" } else { "-" },
        );
    }

    Ok(())
}

/// Pin a product and report the resynchronized state.
///
/// # Errors
///
/// Returns an error when the source rejects the mutation or the resync
/// fetch fails.
pub async fn pin(
    store: &ProductStore<AppSource>,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = ProductId::new(id);
    store.pin(&id).await?;
    println!("Pinned {}", describe(store, &id));
    Ok(())
}

/// Unpin a product and report the resynchronized state.
///
/// # Errors
///
/// Same contract as [`pin`].
pub async fn unpin(
    store: &ProductStore<AppSource>,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = ProductId::new(id);
    store.unpin(&id).await?;
    println!("Unpinned {}", describe(store, &id));
    Ok(())
}

/// Case-insensitive match on product name or brand, like the dashboard
/// search box.
fn matches_search(product: &Product, term: &str) -> bool {
    let needle = term.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.brand.to_lowercase().contains(&needle)
}

fn describe<S>(store: &ProductStore<S>, id: &ProductId) -> String
where
    S: glowcart_catalog::ProductSource,
{
    store
        .products()
        .into_iter()
        .find(|p| &p.id == id)
        .map_or_else(|| id.to_string(), |p| format!("{} ({})", p.name, p.id))
}

fn stat(value: Option<u64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}
