//! REST API handlers for checkout

use super::flow::CheckoutFlow;
use crate::auth::helpers::require_user;
use crate::cart::helpers::CartSessionId;
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};

/// Creates routes for checkout
pub fn routes() -> Router<SharedState> {
    Router::new().route(
        "/checkout",
        get(checkout_status).post(place_order).delete(dismiss),
    )
}

/// Endpoint: GET /checkout
async fn checkout_status(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let session = CartSessionId::resolve(&headers);
    let status = CheckoutFlow::from_state(&state).status(&session.id);
    session.attach(Json(status))
}

/// Endpoint: POST /checkout
/// Places the order for the signed-in user's cart.
async fn place_order(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let session = CartSessionId::resolve(&headers);

    let result = async {
        let customer = require_user(&state, &headers).await?;
        let confirmation = CheckoutFlow::from_state(&state)
            .place_order(&session.id, &customer)
            .await?;
        Ok::<_, AppError>((StatusCode::CREATED, Json(confirmation)))
    }
    .await;

    session.attach(result)
}

/// Endpoint: DELETE /checkout
/// Dismisses a completed order confirmation.
async fn dismiss(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let session = CartSessionId::resolve(&headers);
    let status = CheckoutFlow::from_state(&state).dismiss(&session.id);
    session.attach(Json(status))
}
