//! Coupon catalog.
//!
//! Coupons are static reference data. Usage counts are reported as seeded and
//! are never incremented by this service.

use crate::pricing::models::{Coupon, DiscountRule};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

/// Number of coupons advertised next to the coupon input
pub const ADVERTISED_COUPONS: usize = 3;

fn midnight_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    // An impossible date reads as already expired.
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// The store's coupon definitions
#[derive(Debug, Clone)]
pub struct CouponCatalog {
    coupons: Vec<Coupon>,
}

impl Default for CouponCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl CouponCatalog {
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// The coupons the store ships with. Their expiry dates are fixed, in 2025.
    pub fn standard() -> Self {
        Self::new(vec![
            Coupon {
                id: "welcome10".into(),
                code: "WELCOME10".into(),
                rule: DiscountRule::Percentage {
                    percent: Decimal::from(10),
                    max_discount: None,
                },
                min_purchase: Some(Decimal::from(199)),
                expires_at: midnight_utc(2025, 12, 31),
                usage_limit: Some(1000),
                used_count: 45,
                active: true,
            },
            Coupon {
                id: "save50".into(),
                code: "SAVE50".into(),
                rule: DiscountRule::Fixed {
                    amount: Decimal::from(50),
                },
                min_purchase: Some(Decimal::from(299)),
                expires_at: midnight_utc(2025, 6, 30),
                usage_limit: Some(500),
                used_count: 23,
                active: true,
            },
            Coupon {
                id: "vip20".into(),
                code: "VIP20".into(),
                rule: DiscountRule::Percentage {
                    percent: Decimal::from(20),
                    max_discount: Some(Decimal::from(200)),
                },
                min_purchase: Some(Decimal::from(500)),
                expires_at: midnight_utc(2025, 3, 31),
                usage_limit: Some(100),
                used_count: 12,
                active: true,
            },
            Coupon {
                id: "first25".into(),
                code: "FIRST25".into(),
                rule: DiscountRule::Percentage {
                    percent: Decimal::from(25),
                    max_discount: Some(Decimal::from(150)),
                },
                min_purchase: Some(Decimal::from(399)),
                expires_at: midnight_utc(2025, 8, 31),
                usage_limit: Some(200),
                used_count: 8,
                active: true,
            },
        ])
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Coupons whose code matches `code`, ignoring case.
    pub fn with_code<'s, 'c>(&'s self, code: &'c str) -> impl Iterator<Item = &'s Coupon> + 'c
    where
        's: 'c,
    {
        self.coupons.iter().filter(move |c| c.matches_code(code))
    }

    /// The coupons suggested to shoppers on the cart page.
    pub fn advertised(&self) -> &[Coupon] {
        let end = self.coupons.len().min(ADVERTISED_COUPONS);
        &self.coupons[..end]
    }

    /// How many coupons can still be redeemed at `now`.
    pub fn live_count(&self, now: DateTime<Utc>) -> usize {
        self.coupons.iter().filter(|c| c.is_live(now)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_coupons_expire_during_2025() {
        let catalog = CouponCatalog::standard();

        assert_eq!(catalog.live_count(midnight_utc(2025, 1, 15)), 4);
        assert_eq!(catalog.live_count(midnight_utc(2025, 7, 1)), 2);
        assert_eq!(catalog.live_count(midnight_utc(2026, 1, 1)), 0);
    }

    #[test]
    fn advertises_first_three() {
        let catalog = CouponCatalog::standard();
        let codes: Vec<_> = catalog.advertised().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes.len(), ADVERTISED_COUPONS);
        assert_eq!(codes, ["WELCOME10", "SAVE50", "VIP20"]);
    }
}
