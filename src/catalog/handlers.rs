//! REST API handlers for the product and coupon catalogs

use super::query::{self, ProductQuery};
use crate::error::AppError;
use crate::pricing::Coupon;
use crate::state::SharedState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

/// Products shown in the home page's featured strip
pub const FEATURED_LIMIT: usize = 4;

/// Creates routes for catalog browsing
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/featured", get(featured_products))
        .route("/products/:id", get(get_product))
        .route("/coupons", get(advertised_coupons))
}

/// Endpoint: GET /products?search=&category=&sort=
async fn list_products(
    State(state): State<SharedState>,
    Query(params): Query<ProductQuery>,
) -> Result<Response, AppError> {
    let products = params.run(&state.products).map_err(AppError::BadRequest)?;
    Ok(Json(products).into_response())
}

/// Endpoint: GET /products/featured
async fn featured_products(State(state): State<SharedState>) -> Response {
    Json(query::featured(&state.products, FEATURED_LIMIT)).into_response()
}

/// Endpoint: GET /products/:id
async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    state
        .products
        .find(&id)
        .map(|product| Json(product).into_response())
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// A coupon as advertised to shoppers
#[derive(Serialize)]
struct CouponOffer<'a> {
    #[serde(flatten)]
    coupon: &'a Coupon,
    label: String,
}

/// Endpoint: GET /coupons
async fn advertised_coupons(State(state): State<SharedState>) -> Response {
    let offers: Vec<CouponOffer> = state
        .coupons
        .advertised()
        .iter()
        .map(|coupon| CouponOffer {
            coupon,
            label: coupon.rule.label(),
        })
        .collect();

    Json(offers).into_response()
}
