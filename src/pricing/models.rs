//! Pricing Domain Models
//!
//! Coupons, their discount rules, and the subtotal/discount/total summary
//! shown for a cart.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Rounds an amount to cents for presentation and order totals.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

// =============================================================================
// Coupons
// =============================================================================

/// How a coupon reduces the subtotal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "discountType", rename_all = "camelCase")]
pub enum DiscountRule {
    /// `percent`% of the subtotal, never more than `max_discount` when set
    #[serde(rename_all = "camelCase")]
    Percentage {
        percent: Decimal,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_discount: Option<Decimal>,
    },

    /// A flat amount, applied as-is even when it exceeds the subtotal
    #[serde(rename_all = "camelCase")]
    Fixed { amount: Decimal },
}

impl DiscountRule {
    /// Computes the discount this rule grants on `subtotal`.
    ///
    /// Fixed discounts are not bounded by the subtotal, so the resulting
    /// total can be negative.
    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        let raw = match self {
            DiscountRule::Percentage {
                percent,
                max_discount,
            } => {
                let discount = subtotal * *percent / Decimal::ONE_HUNDRED;
                match max_discount {
                    Some(cap) => discount.min(*cap),
                    None => discount,
                }
            }
            DiscountRule::Fixed { amount } => *amount,
        };

        round_money(raw)
    }

    /// Short human-readable label, e.g. `10% off` or `50.00 off`.
    pub fn label(&self) -> String {
        match self {
            DiscountRule::Percentage { percent, .. } => format!("{}% off", percent.normalize()),
            DiscountRule::Fixed { amount } => format!("{} off", round_money(*amount)),
        }
    }
}

/// A coupon definition from the coupon catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,

    /// Code typed by the customer; compared case-insensitively
    pub code: String,

    #[serde(flatten)]
    pub rule: DiscountRule,

    /// Subtotal the cart must reach for the coupon to apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_purchase: Option<Decimal>,

    /// The coupon is valid strictly before this instant
    pub expires_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,

    pub used_count: u32,

    pub active: bool,
}

impl Coupon {
    /// Whether `code` names this coupon, ignoring case and surrounding blanks.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    /// Active and not yet expired at `now`; the minimum purchase is not considered.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.active && now < self.expires_at
    }
}

/// The coupon currently applied to a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCoupon {
    pub code: String,

    #[serde(flatten)]
    pub rule: DiscountRule,

    pub applied_at: DateTime<Utc>,
}

impl AppliedCoupon {
    pub fn from_coupon(coupon: &Coupon, applied_at: DateTime<Utc>) -> Self {
        Self {
            code: coupon.code.clone(),
            rule: coupon.rule.clone(),
            applied_at,
        }
    }
}

/// Result of a successful coupon application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponApplication {
    pub applied: AppliedCoupon,
    pub discount: Decimal,
}

// =============================================================================
// Price summary
// =============================================================================

/// Subtotal, discount and amount due for a cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl PriceSummary {
    /// Prices `subtotal` with an optional applied coupon.
    pub fn compute(subtotal: Decimal, coupon: Option<&AppliedCoupon>) -> Self {
        let subtotal = round_money(subtotal);
        let discount = coupon.map_or_else(|| round_money(Decimal::ZERO), |c| c.rule.discount_for(subtotal));

        Self {
            subtotal,
            discount,
            total: round_money(subtotal - discount),
        }
    }
}
