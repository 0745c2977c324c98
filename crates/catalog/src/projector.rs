//! Pure projection of the product list: filter, then stable sort.
//!
//! [`project`] is deterministic and referentially transparent. It never
//! mutates its input; callers get a fresh ordered `Vec` on every call.
//!
//! Filters compose as intersections and apply in a fixed order: brand,
//! category, price. Empty brand/category sets mean "no restriction", not
//! "exclude all" - that is deliberate policy. The price range is applied
//! unconditionally, even at its default bounds.
//!
//! Sorting is stable: ties keep the relative order the filtered list already
//! had, which for [`SortOption::Popularity`] is the pre-ranked order supplied
//! by the upstream source. Pinned products keep whatever position the sort
//! gives them; pinning only drives admin-surface markers.

use std::collections::HashSet;

use glowcart_core::Product;
use rust_decimal::Decimal;

/// Inclusive price window for the price filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRange {
    /// Lower bound, inclusive.
    pub min: Decimal,
    /// Upper bound, inclusive.
    pub max: Decimal,
}

impl PriceRange {
    /// Create a range from inclusive bounds.
    #[must_use]
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// A range that admits any non-negative price.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::MAX,
        }
    }

    /// Whether `price` falls inside the range, bounds included.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    /// The full storefront slider range, 0 to 100 currency units.
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        }
    }
}

/// Which products to keep.
///
/// `brands` and `categories` are matched against the product's display
/// strings. Empty sets admit everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Brands to keep; empty means all brands.
    pub brands: HashSet<String>,
    /// Categories to keep; empty means all categories.
    pub categories: HashSet<String>,
    /// Inclusive price window, always applied.
    pub price_range: PriceRange,
}

impl FilterSpec {
    /// Whether a product passes all three filters, in order: brand,
    /// category, price.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.brands.is_empty() && !self.brands.contains(&product.brand) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }
        self.price_range.contains(product.price)
    }
}

/// How to order the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Keep the source order; the upstream provider pre-ranks by popularity.
    #[default]
    Popularity,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Most recently created first.
    Newest,
    /// Most viewed last month first; missing stats count as zero views.
    MostViewed,
    /// Most sold last month first; missing stats count as zero units.
    BestSelling,
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Popularity => "popularity",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Newest => "newest",
            Self::MostViewed => "most-viewed",
            Self::BestSelling => "best-selling",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(Self::Popularity),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "newest" => Ok(Self::Newest),
            "most-viewed" => Ok(Self::MostViewed),
            "best-selling" => Ok(Self::BestSelling),
            _ => Err(format!("invalid sort option: {s}")),
        }
    }
}

/// Derive the displayed list from a snapshot, a filter spec, and a sort
/// option.
///
/// Same inputs always yield the same ordered list. The input slice is left
/// untouched.
#[must_use]
pub fn project(products: &[Product], filters: &FilterSpec, sort: SortOption) -> Vec<Product> {
    let mut result: Vec<Product> = products
        .iter()
        .filter(|product| filters.matches(product))
        .cloned()
        .collect();

    // Vec::sort_by is stable, so ties preserve the filtered (pre-ranked) order.
    match sort {
        SortOption::Popularity => {}
        SortOption::PriceAsc => result.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDesc => result.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOption::MostViewed => {
            result.sort_by(|a, b| b.views_last_month().cmp(&a.views_last_month()));
        }
        SortOption::BestSelling => {
            result.sort_by(|a, b| b.volume_sold_last_month().cmp(&a.volume_sold_last_month()));
        }
    }

    result
}
