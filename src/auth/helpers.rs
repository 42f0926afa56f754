//! Request helpers for resolving the signed-in user.

use super::models::{Session, User};
use crate::error::AppError;
use crate::state::AppState;
use axum::http::{header, HeaderMap};

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the request's session; `None` for anonymous requests.
pub async fn current_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<Session>, AppError> {
    match bearer_token(headers) {
        Some(token) => Ok(state.auth.get_session(token).await?),
        None => Ok(None),
    }
}

/// Resolves the signed-in user or fails with `Unauthorized`.
pub async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    current_session(state, headers)
        .await?
        .map(|session| session.user)
        .ok_or_else(|| AppError::Unauthorized("sign in to continue".into()))
}

/// Resolves a signed-in admin; customers get `Forbidden`.
pub async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let user = require_user(state, headers).await?;
    if !user.is_admin() {
        return Err(AppError::Forbidden("admin access required".into()));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn parses_bearer_tokens() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
