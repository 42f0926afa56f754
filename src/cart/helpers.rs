//! Shopping Cart Helpers
//!
//! Cart session identification and formatting helpers used by the handlers.

use super::models::CartItem;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

/// Cookie carrying the cart session identifier
pub const SESSION_COOKIE: &str = "cart_session";

/// Identifies the cart session a request belongs to.
#[derive(Debug, Clone)]
pub struct CartSessionId {
    pub id: String,

    /// True when the request carried no session and one was just created
    pub is_new: bool,
}

impl CartSessionId {
    /// Reads the session from the `cart_session` cookie, creating a new
    /// identifier when the cookie is missing or empty.
    pub fn resolve(headers: &HeaderMap) -> Self {
        match session_from_cookies(headers) {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: new_session_id(),
                is_new: true,
            },
        }
    }

    /// Attaches the `Set-Cookie` header for freshly created sessions.
    pub fn attach(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();

        if self.is_new {
            let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
        }

        response
    }
}

fn session_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Returns a fresh session identifier.
pub fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Produces a human-readable one-line summary for a list of cart items.
///
/// Example output: `"2x Vintage Pearl Ring, 1x Gold Chain Necklace"`.
pub fn format_item_summary(items: &[CartItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.product.name))
        .collect::<Vec<_>>()
        .join(", ")
}
