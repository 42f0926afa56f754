//! Coupon validation errors.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Message shown to the shopper for every rejected coupon
pub const INVALID_COUPON_MESSAGE: &str = "Invalid coupon or not applicable to this order";

/// Why a coupon code could not be applied.
///
/// The variants exist for logs; shoppers always see [`INVALID_COUPON_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    #[error("coupon {0:?} does not exist")]
    Unknown(String),

    #[error("coupon {0} is inactive")]
    Inactive(String),

    #[error("coupon {code} expired at {expires_at}")]
    Expired {
        code: String,
        expires_at: DateTime<Utc>,
    },

    #[error("coupon {code} needs a subtotal of at least {minimum}, cart has {subtotal}")]
    BelowMinimum {
        code: String,
        minimum: Decimal,
        subtotal: Decimal,
    },
}

impl CouponError {
    pub fn user_message(&self) -> &'static str {
        INVALID_COUPON_MESSAGE
    }
}
