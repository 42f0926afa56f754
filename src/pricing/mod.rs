//! Pricing and Coupon Module
//!
//! Pure cart pricing logic:
//! - Coupon and discount rule models
//! - Coupon validation (active flag, expiry, minimum purchase)
//! - Subtotal / discount / total computation

pub mod engine;
pub mod errors;
pub mod models;

pub use engine::{apply_coupon, check_applicable, find_applicable};
pub use errors::{CouponError, INVALID_COUPON_MESSAGE};
pub use models::{round_money, AppliedCoupon, Coupon, CouponApplication, DiscountRule, PriceSummary};
