//! REST API handlers for the admin area

use super::models::AdminOverview;
use crate::auth::helpers::require_admin;
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

/// Creates routes for the admin area
pub fn routes() -> Router<SharedState> {
    Router::new().route("/admin/overview", get(overview))
}

/// Endpoint: GET /admin/overview
/// Admins only; anonymous requests get 401 and customers 403.
async fn overview(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let admin = require_admin(&state, &headers).await?;
    tracing::debug!(user_id = %admin.id, "admin overview requested");

    let overview = AdminOverview::build(&state.products, &state.coupons, state.clock.now());
    Ok(Json(overview).into_response())
}
