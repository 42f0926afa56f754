//! Coupon validation and discount computation.

use super::errors::CouponError;
use super::models::{AppliedCoupon, Coupon, CouponApplication};
use crate::catalog::coupons::CouponCatalog;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Checks a single coupon against the cart subtotal at `now`.
pub fn check_applicable(
    coupon: &Coupon,
    subtotal: Decimal,
    now: DateTime<Utc>,
) -> Result<(), CouponError> {
    if !coupon.active {
        return Err(CouponError::Inactive(coupon.code.clone()));
    }

    if now >= coupon.expires_at {
        return Err(CouponError::Expired {
            code: coupon.code.clone(),
            expires_at: coupon.expires_at,
        });
    }

    if let Some(minimum) = coupon.min_purchase {
        if subtotal < minimum {
            return Err(CouponError::BelowMinimum {
                code: coupon.code.clone(),
                minimum,
                subtotal,
            });
        }
    }

    Ok(())
}

/// Finds a coupon with `code` that applies to `subtotal` at `now`.
///
/// When several coupons share a code the first applicable one wins; if none
/// applies, the error describes the first candidate's failure.
pub fn find_applicable<'a>(
    catalog: &'a CouponCatalog,
    code: &str,
    subtotal: Decimal,
    now: DateTime<Utc>,
) -> Result<&'a Coupon, CouponError> {
    let mut first_failure = None;

    for coupon in catalog.with_code(code) {
        match check_applicable(coupon, subtotal, now) {
            Ok(()) => return Ok(coupon),
            Err(e) => {
                first_failure.get_or_insert(e);
            }
        }
    }

    Err(first_failure.unwrap_or_else(|| CouponError::Unknown(code.trim().to_string())))
}

/// Validates `code` and computes the discount it grants on `subtotal`.
pub fn apply_coupon(
    catalog: &CouponCatalog,
    code: &str,
    subtotal: Decimal,
    now: DateTime<Utc>,
) -> Result<CouponApplication, CouponError> {
    let coupon = find_applicable(catalog, code, subtotal, now)?;
    let discount = coupon.rule.discount_for(subtotal);

    Ok(CouponApplication {
        applied: AppliedCoupon::from_coupon(coupon, now),
        discount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{DiscountRule, PriceSummary};
    use chrono::TimeZone;

    fn jan_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    fn catalog() -> CouponCatalog {
        CouponCatalog::standard()
    }

    #[test]
    fn welcome10_on_200() {
        let subtotal = Decimal::from(200);
        let application = apply_coupon(&catalog(), "WELCOME10", subtotal, jan_2025()).unwrap();

        assert_eq!(application.discount.to_string(), "20.00");
        let summary = PriceSummary::compute(subtotal, Some(&application.applied));
        assert_eq!(summary.total.to_string(), "180.00");
    }

    #[test]
    fn vip20_is_capped() {
        let subtotal = Decimal::from(2000);
        let application = apply_coupon(&catalog(), "vip20", subtotal, jan_2025()).unwrap();

        assert_eq!(application.discount.to_string(), "200.00");
        let summary = PriceSummary::compute(subtotal, Some(&application.applied));
        assert_eq!(summary.total.to_string(), "1800.00");
    }

    #[test]
    fn save50_below_minimum_is_rejected() {
        let err = apply_coupon(&catalog(), "SAVE50", Decimal::from(100), jan_2025()).unwrap_err();
        assert!(matches!(err, CouponError::BelowMinimum { .. }));
    }

    #[test]
    fn minimum_is_inclusive() {
        let application =
            apply_coupon(&catalog(), "SAVE50", Decimal::from(299), jan_2025()).unwrap();
        assert_eq!(application.discount, Decimal::from(50));
    }

    #[test]
    fn expired_coupon_is_rejected_for_any_subtotal() {
        let after = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        for subtotal in [100, 500, 2000, 100_000] {
            let err = apply_coupon(&catalog(), "VIP20", Decimal::from(subtotal), after).unwrap_err();
            assert!(matches!(err, CouponError::Expired { .. }));
        }
    }

    #[test]
    fn expiry_instant_itself_is_expired() {
        let coupon = catalog().coupons()[2].clone();
        let err = check_applicable(&coupon, Decimal::from(1000), coupon.expires_at).unwrap_err();
        assert!(matches!(err, CouponError::Expired { .. }));
    }

    #[test]
    fn code_is_case_insensitive_and_trimmed() {
        assert!(apply_coupon(&catalog(), "  welcome10 ", Decimal::from(250), jan_2025()).is_ok());
    }

    #[test]
    fn unknown_and_inactive_codes() {
        let err = apply_coupon(&catalog(), "NOPE", Decimal::from(1000), jan_2025()).unwrap_err();
        assert_eq!(err, CouponError::Unknown("NOPE".into()));

        let mut coupons = catalog().coupons().to_vec();
        coupons[0].active = false;
        let inactive = CouponCatalog::new(coupons);
        let err = apply_coupon(&inactive, "WELCOME10", Decimal::from(1000), jan_2025()).unwrap_err();
        assert_eq!(err, CouponError::Inactive("WELCOME10".into()));
        assert_eq!(err.user_message(), crate::pricing::INVALID_COUPON_MESSAGE);
    }

    #[test]
    fn fixed_discount_can_exceed_subtotal() {
        let catalog = CouponCatalog::new(vec![Coupon {
            id: "big".into(),
            code: "BIG".into(),
            rule: DiscountRule::Fixed {
                amount: Decimal::from(500),
            },
            min_purchase: None,
            expires_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            usage_limit: None,
            used_count: 0,
            active: true,
        }]);

        let subtotal = Decimal::from(120);
        let application = apply_coupon(&catalog, "BIG", subtotal, jan_2025()).unwrap();
        let summary = PriceSummary::compute(subtotal, Some(&application.applied));
        assert_eq!(summary.total.to_string(), "-380.00");
    }

    #[test]
    fn duplicate_codes_pick_an_applicable_one() {
        let mut expired = catalog().coupons()[0].clone();
        expired.expires_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let valid = catalog().coupons()[0].clone();
        let catalog = CouponCatalog::new(vec![expired, valid]);

        assert!(apply_coupon(&catalog, "WELCOME10", Decimal::from(300), jan_2025()).is_ok());
    }

    #[test]
    fn found_coupon_outlives_the_typed_code() {
        let catalog = catalog();
        let coupon = {
            let typed = String::from(" first25 ");
            find_applicable(&catalog, &typed, Decimal::from(400), jan_2025()).unwrap()
        };
        assert_eq!(coupon.code, "FIRST25");
    }
}
