//! Catalog Module
//!
//! Static reference data offered by the store:
//! - Product models and generated product fixtures
//! - The coupon catalog
//! - Listing queries (search, category, sort, featured)
//! - REST API handlers

pub mod coupons;
pub mod handlers;
pub mod models;
pub mod products;
pub mod query;

pub use coupons::CouponCatalog;
pub use handlers::routes;
pub use models::{Category, Product};
pub use products::ProductCatalog;
