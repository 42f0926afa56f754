//! Product catalog fixtures.
//!
//! The store has no product database: the catalog is generated at startup
//! from a fixed list of names per category with randomized pricing and review
//! metadata. Passing a seed makes the generated catalog reproducible.

use super::models::{Category, Product};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rust_decimal::{Decimal, RoundingStrategy};

/// Lowest generated price, in cents
pub const MIN_PRICE_CENTS: i64 = 29_900;
/// Highest generated price, in cents
pub const MAX_PRICE_CENTS: i64 = 299_900;

const SALE_PROBABILITY: f64 = 0.3;
const IN_STOCK_PROBABILITY: f64 = 0.9;
const FEATURED_PROBABILITY: f64 = 0.3;

const IMAGE_BASE_ID: u64 = 1_520_000_000_000;

fn product_names(category: Category) -> [&'static str; 5] {
    match category {
        Category::Rings => [
            "Diamond Solitaire Ring",
            "Elegant Rose Gold Ring",
            "Emerald Trio Ring",
            "Vintage Pearl Ring",
            "Golden Infinity Ring",
        ],
        Category::Necklaces => [
            "Gold Chain Necklace",
            "Classic Pearl Necklace",
            "Diamond Heart Necklace",
            "Delicate Layering Necklace",
            "Crystal Statement Necklace",
        ],
        Category::Earrings => [
            "Golden Hoop Earrings",
            "Classic Pearl Earrings",
            "Crystal Drop Earrings",
            "Diamond Stud Earrings",
            "Elegant Cascade Earrings",
        ],
        Category::Bracelets => [
            "Diamond Tennis Bracelet",
            "Gold Chain Bracelet",
            "Charm Bracelet",
            "Crystal Riviera Bracelet",
            "Vintage Pearl Bracelet",
        ],
    }
}

/// Generates the full catalog: five products for each category.
pub fn generate_products<R: Rng + ?Sized>(rng: &mut R) -> Vec<Product> {
    let mut products = Vec::with_capacity(Category::ALL.len() * 5);

    for (category_index, category) in Category::ALL.into_iter().enumerate() {
        for (index, name) in product_names(category).into_iter().enumerate() {
            products.push(generate_product(rng, category, category_index, index, name));
        }
    }

    products
}

fn generate_product<R: Rng + ?Sized>(
    rng: &mut R,
    category: Category,
    category_index: usize,
    index: usize,
    name: &str,
) -> Product {
    let price = Decimal::new(rng.random_range(MIN_PRICE_CENTS..=MAX_PRICE_CENTS), 2);
    let original_price = rng.random_bool(SALE_PROBABILITY).then(|| {
        (price * Decimal::new(13, 1))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    });

    let image_id = IMAGE_BASE_ID + (category_index as u64) * 1000 + index as u64;
    let images = [0, 100, 200]
        .into_iter()
        .map(|offset| {
            format!(
                "https://images.unsplash.com/photo-{}?w=400&h=400&fit=crop&crop=center",
                image_id + offset
            )
        })
        .collect();

    Product {
        id: format!("{}-{}", category, index + 1),
        name: name.to_string(),
        description: format!(
            "{name} - An exclusive piece from our collection, crafted from premium \
             materials with a unique design."
        ),
        price,
        original_price,
        category,
        images,
        in_stock: rng.random_bool(IN_STOCK_PROBABILITY),
        featured: rng.random_bool(FEATURED_PROBABILITY),
        rating: Decimal::new(rng.random_range(40..=50), 1),
        reviews: rng.random_range(15..=250),
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The immutable list of products offered by the store
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Generates a catalog from the thread-local RNG.
    pub fn generate() -> Self {
        Self::new(generate_products(&mut rand::rng()))
    }

    /// Generates a reproducible catalog: the same seed yields the same products.
    pub fn seeded(seed: u64) -> Self {
        Self::new(generate_products(&mut StdRng::seed_from_u64(seed)))
    }

    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by its identifier.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_five_products_per_category() {
        let catalog = ProductCatalog::seeded(7);
        assert_eq!(catalog.len(), 20);

        for category in Category::ALL {
            let count = catalog
                .products()
                .iter()
                .filter(|p| p.category == category)
                .count();
            assert_eq!(count, 5, "{category} should have 5 products");
        }

        assert!(catalog.find("rings-1").is_some());
        assert!(catalog.find("bracelets-5").is_some());
        assert!(catalog.find("rings-6").is_none());
    }

    #[test]
    fn prices_and_ratings_stay_in_bounds() {
        let min = Decimal::new(MIN_PRICE_CENTS, 2);
        let max = Decimal::new(MAX_PRICE_CENTS, 2);

        for seed in 0..20 {
            for product in ProductCatalog::seeded(seed).products() {
                assert!(product.price >= min && product.price <= max);
                assert!(product.rating >= Decimal::new(40, 1));
                assert!(product.rating <= Decimal::from(5));
                assert!((15..=250).contains(&product.reviews));
                assert_eq!(product.images.len(), 3);

                if let Some(original) = product.original_price {
                    assert!(original > product.price);
                }
            }
        }
    }

    #[test]
    fn seeded_catalogs_are_reproducible() {
        assert_eq!(
            ProductCatalog::seeded(42).products(),
            ProductCatalog::seeded(42).products()
        );
    }
}
