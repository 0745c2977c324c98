//! The product record and its merchandising stats.
//!
//! Products are immutable per fetch cycle: every field except `is_pinned`
//! comes from the upstream source and is treated as read-only. Wire names
//! are camelCase to match the catalog feed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::status::{BrandTier, InventoryStatus};

/// A product as fetched from the catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique stable identifier within a snapshot.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Brand display name.
    pub brand: String,
    /// Editorial brand tier (badge styling only).
    pub brand_tier: BrandTier,
    /// Category display name.
    pub category: String,
    /// Non-negative price in currency units.
    pub price: Decimal,
    /// Image URL (display passthrough).
    pub image: String,
    /// Stock availability.
    pub inventory_status: InventoryStatus,
    /// Whether an admin has pinned this product. The only field admin
    /// actions mutate; authoritative state lives at the source.
    pub is_pinned: bool,
    /// Creation timestamp, used for recency sorting.
    pub created_at: DateTime<Utc>,
    /// Marketing copy: key benefits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
    /// Marketing copy: usage instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_use: Option<String>,
    /// Merchandising stats. Absent for products without analytics coverage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<ProductStats>,
}

impl Product {
    /// Views over the last month, defaulting to 0 when stats are absent.
    #[must_use]
    pub fn views_last_month(&self) -> u64 {
        self.stats.as_ref().map_or(0, |s| s.views_last_month)
    }

    /// Units sold over the last month, defaulting to 0 when stats are absent.
    #[must_use]
    pub fn volume_sold_last_month(&self) -> u64 {
        self.stats.as_ref().map_or(0, |s| s.volume_sold_last_month)
    }
}

/// Merchandising statistics attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    /// Cost of goods sold, in currency units.
    pub cogs: Decimal,
    /// Days of inventory remaining at the current sell-through rate.
    pub days_of_inventory: u32,
    /// Units currently in stock.
    pub units_in_stock: u64,
    /// Product page views over the last month.
    pub views_last_month: u64,
    /// Units sold over the last month.
    pub volume_sold_last_month: u64,
}
