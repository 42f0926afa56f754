//! The cart store: line items and their totals.

use super::models::CartItem;
use crate::catalog::models::Product;
use rust_decimal::Decimal;

/// Products selected by one shopper and their quantities.
///
/// Every line has a quantity of at least one; operations that would take a
/// line to zero remove it instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`, merging with an existing line.
    ///
    /// Returns the line's new quantity.
    pub fn add_item(&mut self, product: &Product) -> u32 {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }

        self.items.push(CartItem {
            product: product.clone(),
            quantity: 1,
        });
        1
    }

    /// Sets the quantity of a line; `new_quantity <= 0` removes it.
    ///
    /// Unknown product ids are ignored.
    pub fn update_quantity(&mut self, product_id: &str, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        }
    }

    /// Removes a line. Returns whether it was present.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * quantity` over every line.
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities, not the number of lines.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct products
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductCatalog;

    fn products() -> ProductCatalog {
        ProductCatalog::seeded(3)
    }

    #[test]
    fn adding_twice_increments_one_line() {
        let catalog = products();
        let ring = catalog.find("rings-1").unwrap();

        let mut cart = CartStore::new();
        assert_eq!(cart.add_item(ring), 1);
        assert_eq!(cart.add_item(ring), 2);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn subtotal_and_item_count() {
        let catalog = products();
        let ring = catalog.find("rings-2").unwrap();
        let necklace = catalog.find("necklaces-3").unwrap();

        let mut cart = CartStore::new();
        cart.add_item(ring);
        cart.add_item(necklace);
        cart.update_quantity(&necklace.id, 3);

        assert_eq!(cart.subtotal(), ring.price + necklace.price * Decimal::from(3));
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn zero_quantity_removes_the_line() {
        let catalog = products();
        let ring = catalog.find("rings-1").unwrap();
        let hoop = catalog.find("earrings-1").unwrap();

        let mut cart = CartStore::new();
        cart.add_item(ring);
        cart.add_item(hoop);
        cart.update_quantity(&ring.id, 0);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 1);

        cart.update_quantity(&hoop.id, -4);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let catalog = products();
        let mut cart = CartStore::new();
        cart.add_item(catalog.find("rings-1").unwrap());

        cart.update_quantity("rings-99", 5);
        assert!(!cart.remove_item("rings-99"));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn remove_and_clear() {
        let catalog = products();
        let mut cart = CartStore::new();
        cart.add_item(catalog.find("rings-1").unwrap());
        cart.add_item(catalog.find("rings-2").unwrap());

        assert!(cart.remove_item("rings-1"));
        assert_eq!(cart.line_count(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }
}
