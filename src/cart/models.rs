//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use crate::catalog::models::Product;
use crate::checkout::models::CheckoutStatus;
use crate::pricing::models::{round_money, AppliedCoupon, PriceSummary};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Represents a product line in the shopping cart
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// The product, as listed when it was added
    pub product: Product,

    /// Quantity of this product, never zero
    pub quantity: u32,
}

impl CartItem {
    /// `price * quantity` for this line
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

// =============================================================================
// Request payloads
// =============================================================================

/// Body of `POST /cart/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub product_id: String,
}

/// Body of `PUT /cart/items/:product_id`
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityInput {
    /// New quantity; zero or less removes the line
    pub quantity: i64,
}

/// Body of `POST /cart/coupon`
#[derive(Debug, Deserialize)]
pub struct ApplyCouponInput {
    pub code: String,
}

// =============================================================================
// Responses
// =============================================================================

/// A cart line as rendered to the client
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Decimal,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            product: item.product.clone(),
            quantity: item.quantity,
            line_total: round_money(item.line_total()),
        }
    }
}

/// Full cart state returned by every cart endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    /// Cart session identifier
    pub cart_id: String,

    pub items: Vec<CartLineView>,

    /// Sum of quantities, used for the header badge
    pub item_count: u32,

    #[serde(flatten)]
    pub pricing: PriceSummary,

    pub applied_coupon: Option<AppliedCoupon>,

    /// Message from the last rejected coupon, if not cleared since
    pub coupon_error: Option<String>,

    pub checkout: CheckoutStatus,
}
