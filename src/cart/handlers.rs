//! REST API handlers for shopping cart operations
//!
//! This module implements HTTP endpoints for cart line items and coupons.
//! Every response carries the full cart view. Edits made while an order is
//! being submitted are rejected with 409.

use super::{helpers::CartSessionId, models::*};
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    routing::{get, post, put},
    Json, Router,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route(
            "/cart/items/:product_id",
            put(update_quantity).delete(remove_item),
        )
        .route("/cart/coupon", post(apply_coupon).delete(remove_coupon))
}

/// Endpoint: GET /cart
async fn get_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let session = CartSessionId::resolve(&headers);
    let view = state.sessions.view(&session.id);
    session.attach(Json(view))
}

/// Endpoint: POST /cart/items
/// Adds one unit of a catalog product.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemInput>,
) -> Response {
    let session = CartSessionId::resolve(&headers);

    let result = match state.products.find(&payload.product_id) {
        Some(product) => state.sessions.with_session(&session.id, |s| {
            s.ensure_editable()?;
            let quantity = s.cart.add_item(product);
            tracing::debug!(cart_id = %session.id, product_id = %product.id, quantity, "item added");
            Ok::<_, AppError>(Json(s.view(&session.id)))
        }),
        None => Err(AppError::NotFound(format!(
            "product {}",
            payload.product_id
        ))),
    };

    session.attach(result)
}

/// Endpoint: PUT /cart/items/:product_id
/// Sets a line's quantity; zero or less removes it.
async fn update_quantity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
    Json(payload): Json<UpdateQuantityInput>,
) -> Response {
    let session = CartSessionId::resolve(&headers);

    let result = state.sessions.with_session(&session.id, |s| {
        s.ensure_editable()?;
        s.cart.update_quantity(&product_id, payload.quantity);
        tracing::debug!(cart_id = %session.id, %product_id, quantity = payload.quantity, "quantity updated");
        Ok::<_, AppError>(Json(s.view(&session.id)))
    });

    session.attach(result)
}

/// Endpoint: DELETE /cart/items/:product_id
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> Response {
    let session = CartSessionId::resolve(&headers);

    let result = state.sessions.with_session(&session.id, |s| {
        s.ensure_editable()?;
        if s.cart.remove_item(&product_id) {
            tracing::debug!(cart_id = %session.id, %product_id, "item removed");
        }
        Ok::<_, AppError>(Json(s.view(&session.id)))
    });

    session.attach(result)
}

/// Endpoint: DELETE /cart
async fn clear_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let session = CartSessionId::resolve(&headers);

    let result = state.sessions.with_session(&session.id, |s| {
        s.ensure_editable()?;
        s.cart.clear();
        Ok::<_, AppError>(Json(s.view(&session.id)))
    });

    session.attach(result)
}

/// Endpoint: POST /cart/coupon
/// Applies a coupon code to the cart, replacing any coupon already applied.
async fn apply_coupon(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<ApplyCouponInput>,
) -> Response {
    let session = CartSessionId::resolve(&headers);
    let now = state.clock.now();

    let result = state.sessions.with_session(&session.id, |s| {
        s.ensure_editable()?;
        match s.apply_coupon(&state.coupons, &payload.code, now) {
            Ok(application) => {
                tracing::info!(
                    cart_id = %session.id,
                    code = %application.applied.code,
                    discount = %application.discount,
                    "coupon applied"
                );
                Ok(Json(s.view(&session.id)))
            }
            Err(e) => {
                tracing::warn!(cart_id = %session.id, reason = %e, "coupon rejected");
                Err(AppError::from(e))
            }
        }
    });

    session.attach(result)
}

/// Endpoint: DELETE /cart/coupon
async fn remove_coupon(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let session = CartSessionId::resolve(&headers);

    let result = state.sessions.with_session(&session.id, |s| {
        s.ensure_editable()?;
        s.remove_coupon();
        Ok::<_, AppError>(Json(s.view(&session.id)))
    });

    session.attach(result)
}
