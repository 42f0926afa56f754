//! Checkout state machine: `Idle -> Processing -> Completed`.
//!
//! The session is marked `Processing` inside a short critical section, the
//! guard is released while the order service is awaited, and the outcome is
//! committed (or rolled back) in a second critical section.

use super::errors::CheckoutError;
use super::models::{CheckoutStatus, OrderConfirmation, OrderDraft, OrderReceipt};
use super::submitter::{submit_with_retry, OrderSubmitter, RetryPolicy};
use crate::auth::models::User;
use crate::cart::helpers::format_item_summary;
use crate::cart::CartSessions;
use crate::catalog::coupons::CouponCatalog;
use crate::clock::Clock;
use crate::pricing;
use crate::state::AppState;

pub struct CheckoutFlow<'a> {
    sessions: &'a CartSessions,
    coupons: &'a CouponCatalog,
    submitter: &'a dyn OrderSubmitter,
    retry: &'a RetryPolicy,
    clock: &'a dyn Clock,
}

impl<'a> CheckoutFlow<'a> {
    pub fn new(
        sessions: &'a CartSessions,
        coupons: &'a CouponCatalog,
        submitter: &'a dyn OrderSubmitter,
        retry: &'a RetryPolicy,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            sessions,
            coupons,
            submitter,
            retry,
            clock,
        }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(
            &state.sessions,
            &state.coupons,
            state.submitter.as_ref(),
            &state.retry,
            state.clock.as_ref(),
        )
    }

    /// Moves the session to `Processing` and snapshots the order.
    ///
    /// # Errors
    ///
    /// `AlreadyProcessing` while another checkout is in flight, `EmptyCart`
    /// for an empty cart, `InvalidCoupon` when the applied coupon no longer
    /// applies to the current subtotal. The session is untouched on error.
    pub fn begin(&self, cart_id: &str, customer: &User) -> Result<OrderDraft, CheckoutError> {
        let now = self.clock.now();

        self.sessions.with_session(cart_id, |session| {
            if session.checkout.is_processing() {
                return Err(CheckoutError::AlreadyProcessing);
            }

            if session.cart.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }

            if let Some(applied) = &session.applied_coupon {
                pricing::find_applicable(self.coupons, &applied.code, session.cart.subtotal(), now)
                    .map_err(CheckoutError::InvalidCoupon)?;
            }

            let draft = OrderDraft {
                customer: customer.clone(),
                items: session.cart.items().to_vec(),
                pricing: session.pricing(),
                coupon_code: session.applied_coupon.as_ref().map(|c| c.code.clone()),
            };

            session.checkout = CheckoutStatus::Processing { started_at: now };
            Ok(draft)
        })
    }

    /// Runs the whole checkout for `cart_id`.
    ///
    /// On success the cart and coupon are cleared and the confirmation is
    /// stored on the session. On failure, or if this future is dropped before
    /// the order service answers, the session returns to `Idle` with its
    /// cart and coupon intact.
    pub async fn place_order(
        &self,
        cart_id: &str,
        customer: &User,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let draft = self.begin(cart_id, customer)?;
        let in_flight = InFlight {
            sessions: self.sessions,
            cart_id,
            settled: false,
        };
        tracing::debug!(
            %cart_id,
            items = %format_item_summary(&draft.items),
            total = %draft.pricing.total,
            "submitting order"
        );

        let receipt = submit_with_retry(self.submitter, &draft, self.retry).await?;
        Ok(self.complete(in_flight, &draft, receipt))
    }

    fn complete(
        &self,
        mut in_flight: InFlight<'_>,
        draft: &OrderDraft,
        receipt: OrderReceipt,
    ) -> OrderConfirmation {
        let confirmation = OrderConfirmation::new(draft, receipt);
        let cart_id = in_flight.cart_id;

        self.sessions.with_session(cart_id, |session| {
            session.cart.clear();
            session.remove_coupon();
            session.checkout = CheckoutStatus::Completed(confirmation.clone());
        });
        in_flight.settled = true;

        tracing::info!(
            %cart_id,
            order_number = %confirmation.order_number,
            total = %confirmation.pricing.total,
            "order placed"
        );
        confirmation
    }

    pub fn status(&self, cart_id: &str) -> CheckoutStatus {
        self.sessions.view(cart_id).checkout
    }

    /// Clears a completed checkout back to `Idle`. An in-flight checkout is
    /// left alone.
    pub fn dismiss(&self, cart_id: &str) -> CheckoutStatus {
        self.sessions.with_session(cart_id, |session| {
            if !session.checkout.is_processing() {
                session.checkout = CheckoutStatus::Idle;
            }
            session.checkout.clone()
        })
    }
}

/// Returns a `Processing` session to `Idle` unless the checkout settled.
struct InFlight<'a> {
    sessions: &'a CartSessions,
    cart_id: &'a str,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        self.sessions.with_session(self.cart_id, |session| {
            if session.checkout.is_processing() {
                session.checkout = CheckoutStatus::Idle;
            }
        });
        tracing::warn!(cart_id = %self.cart_id, "checkout did not complete, cart kept");
    }
}
