//! Checkout and order submission errors.

use crate::pricing::CouponError;
use thiserror::Error;

/// Failures reported by the order service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderSubmissionError {
    #[error("payment declined: {0}")]
    PaymentDeclined(String),

    #[error("product {product_id} is no longer available in the requested quantity")]
    InventoryConflict { product_id: String },

    #[error("order service timed out")]
    Timeout,

    #[error("network failure: {0}")]
    Network(String),
}

impl OrderSubmissionError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OrderSubmissionError::Timeout | OrderSubmissionError::Network(_)
        )
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            OrderSubmissionError::PaymentDeclined(_) => {
                "Payment was declined. Please try another payment method."
            }
            OrderSubmissionError::InventoryConflict { .. } => {
                "An item in your cart is no longer available in that quantity."
            }
            OrderSubmissionError::Timeout | OrderSubmissionError::Network(_) => {
                "We could not reach the order service. Please try again."
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("a checkout is already in progress")]
    AlreadyProcessing,

    #[error("applied coupon is no longer valid: {0}")]
    InvalidCoupon(#[source] CouponError),

    #[error(transparent)]
    Submission(#[from] OrderSubmissionError),
}

impl CheckoutError {
    pub fn user_message(&self) -> &'static str {
        match self {
            CheckoutError::EmptyCart => "Your cart is empty.",
            CheckoutError::AlreadyProcessing => "Your order is already being processed.",
            CheckoutError::InvalidCoupon(e) => e.user_message(),
            CheckoutError::Submission(e) => e.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_failures_are_retryable() {
        assert!(OrderSubmissionError::Timeout.is_retryable());
        assert!(OrderSubmissionError::Network("reset".into()).is_retryable());
        assert!(!OrderSubmissionError::PaymentDeclined("card".into()).is_retryable());
        assert!(!OrderSubmissionError::InventoryConflict {
            product_id: "rings-1".into()
        }
        .is_retryable());
    }
}
