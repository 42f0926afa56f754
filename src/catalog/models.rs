//! Catalog Domain Models
//!
//! Products are immutable once the catalog has been generated; carts and
//! orders hold clones of them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Categories
// =============================================================================

/// The fixed set of jewelry categories sold by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Rings,
    Necklaces,
    Earrings,
    Bracelets,
}

impl Category {
    /// All categories, in catalog order
    pub const ALL: [Category; 4] = [
        Category::Rings,
        Category::Necklaces,
        Category::Earrings,
        Category::Bracelets,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Rings => "rings",
            Category::Necklaces => "necklaces",
            Category::Earrings => "earrings",
            Category::Bracelets => "bracelets",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

// =============================================================================
// Products
// =============================================================================

/// A product listed in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier, `<category>-<n>`
    pub id: String,

    pub name: String,

    pub description: String,

    /// Current selling price
    pub price: Decimal,

    /// Pre-discount price shown struck through, when the product is on sale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,

    pub category: Category,

    /// Image URLs, first one is the thumbnail
    pub images: Vec<String>,

    pub in_stock: bool,

    pub featured: bool,

    /// Average rating on a 0-5 scale
    pub rating: Decimal,

    /// Number of reviews behind `rating`
    pub reviews: u32,
}
