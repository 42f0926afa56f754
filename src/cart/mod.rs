//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (CartItem, inputs, views)
//! - The cart store (line items, subtotal, item count)
//! - Per-visitor cart sessions (applied coupon, checkout status)
//! - Session helpers (cookie handling, formatting)
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;
pub mod store;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use state::{CartSession, CartSessions};
pub use store::CartStore;

use crate::state::SharedState;
use std::time::Duration;

/// Drops empty cart sessions every `every` for as long as the server runs.
pub fn spawn_session_pruner(state: SharedState, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = state.sessions.prune_disposable();
            if removed > 0 {
                tracing::debug!(removed, remaining = state.sessions.len(), "pruned cart sessions");
            }
        }
    })
}
