//! Shared application state handed to every handler.

use crate::auth::{AuthError, InMemoryAuthProvider, Profile, Role, SharedAuthProvider};
use crate::cart::CartSessions;
use crate::catalog::{CouponCatalog, ProductCatalog};
use crate::checkout::{RetryPolicy, SharedOrderSubmitter, SimulatedOrderSubmitter};
use crate::clock::{SharedClock, SystemClock};
use crate::config::StorefrontConfig;
use std::sync::Arc;
use std::time::Duration;

/// Thread-safe shared state handle
pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub products: ProductCatalog,
    pub coupons: CouponCatalog,
    pub sessions: CartSessions,
    pub auth: SharedAuthProvider,
    pub submitter: SharedOrderSubmitter,
    pub retry: RetryPolicy,
    pub clock: SharedClock,
    /// Delay of the simulated order service, when that is the submitter in use
    simulated_delay: Option<Duration>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Randomly generated catalog, wall-clock time, in-memory auth and the
    /// simulated order service with its default delay.
    pub fn new() -> Self {
        let clock: SharedClock = Arc::new(SystemClock);
        let defaults = StorefrontConfig::default();

        Self {
            products: ProductCatalog::generate(),
            coupons: CouponCatalog::standard(),
            sessions: CartSessions::new(),
            auth: Arc::new(InMemoryAuthProvider::new()),
            submitter: Arc::new(SimulatedOrderSubmitter::new(
                defaults.checkout_delay,
                clock.clone(),
            )),
            retry: defaults.retry,
            clock,
            simulated_delay: Some(defaults.checkout_delay),
        }
    }

    /// Builds the state described by `config`, seeding the admin account
    /// when one is configured.
    ///
    /// # Errors
    ///
    /// Fails if the admin account cannot be created.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, AuthError> {
        let auth = InMemoryAuthProvider::new();

        if let Some(admin) = &config.admin {
            let profile = Profile {
                name: Some("Admin".into()),
                role: Some(Role::Admin),
            };
            let user = auth.register(&admin.email, &admin.password, &profile)?;
            tracing::info!(user_id = %user.id, email = %user.email, "admin account seeded");
        }

        let products = match config.catalog_seed {
            Some(seed) => ProductCatalog::seeded(seed),
            None => ProductCatalog::generate(),
        };

        Ok(Self::new()
            .with_products(products)
            .with_auth(Arc::new(auth))
            .with_retry(config.retry)
            .with_checkout_delay(config.checkout_delay))
    }

    pub fn with_products(mut self, products: ProductCatalog) -> Self {
        self.products = products;
        self
    }

    pub fn with_coupons(mut self, coupons: CouponCatalog) -> Self {
        self.coupons = coupons;
        self
    }

    pub fn with_auth(mut self, auth: SharedAuthProvider) -> Self {
        self.auth = auth;
        self
    }

    /// Replaces the clock. A simulated order service is rebuilt so orders
    /// are stamped with the same clock.
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        match self.simulated_delay {
            Some(delay) => self.with_checkout_delay(delay),
            None => self,
        }
    }

    pub fn with_submitter(mut self, submitter: SharedOrderSubmitter) -> Self {
        self.submitter = submitter;
        self.simulated_delay = None;
        self
    }

    /// Uses the simulated order service with `delay` and the current clock.
    pub fn with_checkout_delay(mut self, delay: Duration) -> Self {
        self.submitter = Arc::new(SimulatedOrderSubmitter::new(delay, self.clock.clone()));
        self.simulated_delay = Some(delay);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(self)
    }
}
