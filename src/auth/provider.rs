//! The identity provider seam.
//!
//! Account and session handling is delegated to an external identity
//! service; the store only consumes this interface.

use super::errors::AuthError;
use super::models::{Profile, Session, SessionEvent, User};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Shared handle to the configured provider
pub type SharedAuthProvider = Arc<dyn AuthProvider>;

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolves an access token to its session. `None` means anonymous.
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AuthError>;

    /// Subscribes to sign-in and sign-out notifications.
    fn on_session_change(&self) -> broadcast::Receiver<SessionEvent>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_up(&self, email: &str, password: &str, profile: Profile)
        -> Result<User, AuthError>;

    /// Ends the session. Unknown tokens are not an error.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
