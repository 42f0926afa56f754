//! HTTP-facing error type.
//!
//! Handlers return `Result<T, AppError>`; each domain error converts into it
//! and is rendered as `{"error": "<message>"}` with a matching status code.
//! Shoppers only ever see the canned domain messages.

use crate::auth::AuthError;
use crate::checkout::{CheckoutError, OrderSubmissionError};
use crate::pricing::CouponError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("coupon rejected: {0}")]
    Coupon(#[from] CouponError),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Coupon(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::EmailTaken(_) | AuthError::InvalidSignUp(_) => StatusCode::CONFLICT,
                AuthError::Provider(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => StatusCode::BAD_REQUEST,
                CheckoutError::AlreadyProcessing => StatusCode::CONFLICT,
                CheckoutError::InvalidCoupon(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutError::Submission(e) => match e {
                    OrderSubmissionError::PaymentDeclined(_) => StatusCode::PAYMENT_REQUIRED,
                    OrderSubmissionError::InventoryConflict { .. } => StatusCode::CONFLICT,
                    OrderSubmissionError::Timeout | OrderSubmissionError::Network(_) => {
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                },
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show the client.
    pub fn user_message(&self) -> String {
        match self {
            Self::Coupon(err) => err.user_message().to_string(),
            Self::Auth(err) => err.user_message().to_string(),
            Self::Checkout(err) => err.user_message().to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::INVALID_COUPON_MESSAGE;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (AppError::from(CouponError::Unknown("X".into())), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::from(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (AppError::from(AuthError::EmailTaken("a@b.c".into())), StatusCode::CONFLICT),
            (AppError::from(CheckoutError::EmptyCart), StatusCode::BAD_REQUEST),
            (AppError::from(CheckoutError::AlreadyProcessing), StatusCode::CONFLICT),
            (
                AppError::from(CheckoutError::from(OrderSubmissionError::PaymentDeclined("x".into()))),
                StatusCode::PAYMENT_REQUIRED,
            ),
            (
                AppError::from(CheckoutError::from(OrderSubmissionError::Timeout)),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (AppError::Forbidden("admin".into()), StatusCode::FORBIDDEN),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err}");
        }
    }

    #[test]
    fn error_details_are_not_exposed() {
        let err = AppError::from(AuthError::Provider("db at 10.0.0.5 refused".into()));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.user_message(), "Authentication service unavailable");

        let err = AppError::from(CouponError::BelowMinimum {
            code: "SAVE50".into(),
            minimum: 299.into(),
            subtotal: 100.into(),
        });
        assert_eq!(err.user_message(), INVALID_COUPON_MESSAGE);
    }
}
