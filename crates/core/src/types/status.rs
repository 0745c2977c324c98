//! Status and tier enums for products.

use serde::{Deserialize, Serialize};

/// Stock availability of a product.
///
/// Wire values match the upstream catalog feed ("In Stock", "Low Stock",
/// "Out of Stock").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InventoryStatus {
    #[default]
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl std::fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InStock => write!(f, "In Stock"),
            Self::LowStock => write!(f, "Low Stock"),
            Self::OutOfStock => write!(f, "Out of Stock"),
        }
    }
}

/// Editorial classification of brand prestige.
///
/// Used for badge styling on storefront and admin surfaces; it carries no
/// weight in ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BrandTier {
    A,
    B,
    C,
}

impl std::fmt::Display for BrandTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
        }
    }
}

impl std::str::FromStr for BrandTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            _ => Err(format!("invalid brand tier: {s}")),
        }
    }
}
