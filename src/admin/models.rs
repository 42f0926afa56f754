//! Admin dashboard summary.

use crate::catalog::{CouponCatalog, ProductCatalog};
use crate::pricing::Coupon;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview<'a> {
    pub product_count: usize,
    pub featured_count: usize,
    pub out_of_stock_count: usize,
    pub on_sale_count: usize,
    pub coupons: Vec<CouponStatus<'a>>,
}

/// A coupon with whether it can currently be applied
#[derive(Debug, Serialize)]
pub struct CouponStatus<'a> {
    #[serde(flatten)]
    pub coupon: &'a Coupon,

    /// Active and not expired; minimum purchase not considered
    pub live: bool,
}

impl<'a> AdminOverview<'a> {
    pub fn build(products: &ProductCatalog, coupons: &'a CouponCatalog, now: DateTime<Utc>) -> Self {
        let products = products.products();

        Self {
            product_count: products.len(),
            featured_count: products.iter().filter(|p| p.featured).count(),
            out_of_stock_count: products.iter().filter(|p| !p.in_stock).count(),
            on_sale_count: products.iter().filter(|p| p.original_price.is_some()).count(),
            coupons: coupons
                .coupons()
                .iter()
                .map(|coupon| CouponStatus {
                    coupon,
                    live: coupon.is_live(now),
                })
                .collect(),
        }
    }
}
