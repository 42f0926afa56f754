//! REST API handlers for authentication
//!
//! Thin wrappers over the configured identity provider.

use super::helpers::{bearer_token, current_session};
use super::models::{Profile, Role, SignInInput, SignUpInput};
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

/// Creates routes for authentication
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-out", post(sign_out))
        .route("/auth/session", get(session))
}

/// Endpoint: POST /auth/sign-up
/// New accounts are always customers.
async fn sign_up(
    State(state): State<SharedState>,
    Json(payload): Json<SignUpInput>,
) -> Result<impl IntoResponse, AppError> {
    let profile = Profile {
        name: Some(payload.name),
        role: Some(Role::Customer),
    };

    let user = state
        .auth
        .sign_up(&payload.email, &payload.password, profile)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

/// Endpoint: POST /auth/sign-in
async fn sign_in(
    State(state): State<SharedState>,
    Json(payload): Json<SignInInput>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .auth
        .sign_in(&payload.email, &payload.password)
        .await?;

    Ok(Json(session))
}

/// Endpoint: POST /auth/sign-out
async fn sign_out(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = bearer_token(&headers) {
        state.auth.sign_out(token).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Endpoint: GET /auth/session
/// Returns the current session, or `null` when anonymous.
async fn session(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let session = current_session(&state, &headers).await?;
    Ok(Json(json!({ "session": session })))
}
