//! Product listing queries: text search, category filter and ordering.

use super::models::{Category, Product};
use super::products::ProductCatalog;
use serde::Deserialize;

/// How a product listing is ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortOrder {
    /// Name, A to Z
    #[default]
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "price-low")]
    PriceLow,
    #[serde(rename = "price-high")]
    PriceHigh,
    /// Best rated first
    #[serde(rename = "rating")]
    Rating,
}

/// Query-string parameters accepted by the product listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive text matched against name and description
    pub search: Option<String>,

    /// A category name, or `all`
    pub category: Option<String>,

    #[serde(default)]
    pub sort: SortOrder,
}

impl ProductQuery {
    /// Resolves the category filter. `None` means every category.
    ///
    /// Returns an error for names that are neither `all` nor a known category.
    pub fn category_filter(&self) -> Result<Option<Category>, String> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(c) if c.eq_ignore_ascii_case("all") => Ok(None),
            Some(c) => c.parse().map(Some),
        }
    }

    /// Runs the query over the catalog.
    pub fn run<'a>(&self, catalog: &'a ProductCatalog) -> Result<Vec<&'a Product>, String> {
        let category = self.category_filter()?;
        let needle = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();

        let mut products: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect();

        match self.sort {
            SortOrder::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Rating => products.sort_by(|a, b| b.rating.cmp(&a.rating)),
        }

        Ok(products)
    }
}

/// Featured products, in catalog order, at most `limit` of them.
pub fn featured(catalog: &ProductCatalog, limit: usize) -> Vec<&Product> {
    catalog
        .products()
        .iter()
        .filter(|p| p.featured)
        .take(limit)
        .collect()
}
