//! Checkout Domain Models

use crate::auth::models::User;
use crate::cart::models::CartItem;
use crate::pricing::models::PriceSummary;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where a cart session is in the checkout flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CheckoutStatus {
    #[default]
    Idle,

    /// An order submission is in flight
    #[serde(rename_all = "camelCase")]
    Processing { started_at: DateTime<Utc> },

    /// The last order went through; behaves as `Idle` for a new checkout
    Completed(OrderConfirmation),
}

impl CheckoutStatus {
    pub fn is_processing(&self) -> bool {
        matches!(self, CheckoutStatus::Processing { .. })
    }
}

/// Snapshot of a cart handed to the order service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer: User,
    pub items: Vec<CartItem>,
    pub pricing: PriceSummary,
    pub coupon_code: Option<String>,
}

impl OrderDraft {
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }
}

/// What the order service returns for an accepted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    /// Display order number; derived from a timestamp, not guaranteed unique
    pub order_number: String,
    pub placed_at: DateTime<Utc>,
}

impl OrderReceipt {
    /// Builds the `AJ<unix-millis>` order number used by the store.
    pub fn at(placed_at: DateTime<Utc>) -> Self {
        Self {
            order_number: format!("AJ{}", placed_at.timestamp_millis()),
            placed_at,
        }
    }
}

/// Confirmation shown to the shopper once the order is placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_number: String,
    pub customer_name: String,
    pub item_count: u32,
    #[serde(flatten)]
    pub pricing: PriceSummary,
    pub coupon_code: Option<String>,
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    pub fn new(draft: &OrderDraft, receipt: OrderReceipt) -> Self {
        Self {
            order_number: receipt.order_number,
            customer_name: draft.customer.name.clone(),
            item_count: draft.item_count(),
            pricing: draft.pricing,
            coupon_code: draft.coupon_code.clone(),
            placed_at: receipt.placed_at,
        }
    }
}
