//! Authentication Module
//!
//! Sign-in, sign-up and sessions are delegated to an identity provider
//! behind the [`AuthProvider`] trait:
//! - Domain models (User, Role, Session, session events)
//! - The provider trait and an in-memory implementation
//! - Request helpers (bearer tokens, role checks)
//! - REST API handlers

pub mod errors;
pub mod handlers;
pub mod helpers;
pub mod memory;
pub mod models;
pub mod provider;

pub use errors::AuthError;
pub use handlers::routes;
pub use memory::InMemoryAuthProvider;
pub use models::{Profile, Role, Session, SessionEvent, User};
pub use provider::{AuthProvider, SharedAuthProvider};

use tokio::sync::broadcast::error::RecvError;

/// Logs session changes until the provider goes away.
pub fn spawn_session_logger(provider: &dyn AuthProvider) -> tokio::task::JoinHandle<()> {
    let mut events = provider.on_session_change();

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::SignedIn(user)) => {
                    tracing::debug!(user_id = %user.id, role = ?user.role, "session started");
                }
                Ok(SessionEvent::SignedOut(user)) => {
                    tracing::debug!(user_id = %user.id, "session ended");
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "session event listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
