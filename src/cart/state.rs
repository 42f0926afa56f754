//! Shopping Cart State Management
//!
//! Each visitor gets a cart session: one cart, at most one applied coupon,
//! the last coupon error and the checkout status. Sessions live in memory
//! for the life of the process.

use super::models::{CartLineView, CartView};
use super::store::CartStore;
use crate::catalog::coupons::CouponCatalog;
use crate::checkout::errors::CheckoutError;
use crate::checkout::models::CheckoutStatus;
use crate::pricing::{self, AppliedCoupon, CouponApplication, CouponError, PriceSummary};
use chrono::{DateTime, Utc};
use dashmap::DashMap;

// =============================================================================
// Cart session
// =============================================================================

/// Per-visitor shopping state
#[derive(Debug, Clone, Default)]
pub struct CartSession {
    pub cart: CartStore,

    /// The single coupon currently applied, if any
    pub applied_coupon: Option<AppliedCoupon>,

    /// User-facing message from the last rejected coupon
    pub coupon_error: Option<String>,

    pub checkout: CheckoutStatus,
}

impl CartSession {
    /// Cart and coupon edits are refused while an order is being submitted,
    /// so a completed checkout never clears lines it did not order.
    pub fn ensure_editable(&self) -> Result<(), CheckoutError> {
        if self.checkout.is_processing() {
            return Err(CheckoutError::AlreadyProcessing);
        }
        Ok(())
    }

    /// Holds nothing a visitor would miss: empty cart, no coupon, idle checkout.
    pub fn is_disposable(&self) -> bool {
        self.cart.is_empty()
            && self.applied_coupon.is_none()
            && matches!(self.checkout, CheckoutStatus::Idle)
    }

    /// Validates `code` against the current subtotal and applies it,
    /// replacing any coupon already applied.
    ///
    /// On rejection the applied coupon is left as it was and the error
    /// message is kept for display.
    pub fn apply_coupon(
        &mut self,
        coupons: &CouponCatalog,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<CouponApplication, CouponError> {
        self.coupon_error = None;

        match pricing::apply_coupon(coupons, code, self.cart.subtotal(), now) {
            Ok(application) => {
                self.applied_coupon = Some(application.applied.clone());
                Ok(application)
            }
            Err(e) => {
                self.coupon_error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }

    /// Drops the applied coupon and any displayed coupon error.
    pub fn remove_coupon(&mut self) {
        self.applied_coupon = None;
        self.coupon_error = None;
    }

    /// Prices the cart with the applied coupon's rule.
    pub fn pricing(&self) -> PriceSummary {
        PriceSummary::compute(self.cart.subtotal(), self.applied_coupon.as_ref())
    }

    pub fn view(&self, cart_id: &str) -> CartView {
        CartView {
            cart_id: cart_id.to_string(),
            items: self.cart.items().iter().map(CartLineView::from).collect(),
            item_count: self.cart.item_count(),
            pricing: self.pricing(),
            applied_coupon: self.applied_coupon.clone(),
            coupon_error: self.coupon_error.clone(),
            checkout: self.checkout.clone(),
        }
    }
}

// =============================================================================
// Session registry
// =============================================================================

/// In-memory storage for cart sessions, keyed by session id.
/// DashMap allows concurrent access without external Mutexes.
///
/// Session ids come from a client cookie, so any request can create an entry.
/// [`CartSessions::prune_disposable`] drops the ones holding nothing.
#[derive(Debug, Default)]
pub struct CartSessions {
    sessions: DashMap<String, CartSession>,
}

impl CartSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` against the session, creating it if needed.
    ///
    /// The session stays locked while `f` runs, so `f` must not block or await.
    pub fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut CartSession) -> R) -> R {
        let mut session = self.sessions.entry(id.to_string()).or_default();
        f(&mut session)
    }

    /// Renders the session's cart, empty when the session is unknown.
    pub fn view(&self, id: &str) -> CartView {
        match self.sessions.get(id) {
            Some(session) => session.view(id),
            None => CartSession::default().view(id),
        }
    }

    /// Removes sessions with nothing in them. Returns how many were removed.
    pub fn prune_disposable(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_disposable());
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
