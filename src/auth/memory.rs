//! In-memory identity provider.
//!
//! Stands in for the external identity service during development and in
//! tests. Passwords are stored as Argon2 hashes; access tokens are random
//! UUIDs held until sign-out or process exit.

use super::errors::AuthError;
use super::models::{Profile, Session, SessionEvent, User};
use super::provider::AuthProvider;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Minimum password length accepted at sign-up.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Buffered session events per subscriber before lagging.
const EVENT_CAPACITY: usize = 64;

#[derive(Debug)]
struct Account {
    user: User,
    password_hash: String,
}

/// Identity provider keeping accounts and sessions in process memory
#[derive(Debug)]
pub struct InMemoryAuthProvider {
    /// Keyed by lowercased email
    accounts: DashMap<String, Account>,
    /// Keyed by access token
    sessions: DashMap<String, User>,
    events: broadcast::Sender<SessionEvent>,
}

impl Default for InMemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            accounts: DashMap::new(),
            sessions: DashMap::new(),
            events,
        }
    }

    /// Creates an account synchronously. Used for sign-up and for seeding
    /// accounts (such as the admin) at startup.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidSignUp` for a malformed email or a short
    /// password, and `AuthError::EmailTaken` if the email is registered.
    pub fn register(&self, email: &str, password: &str, profile: &Profile) -> Result<User, AuthError> {
        let email = normalize_email(email).ok_or_else(|| {
            AuthError::InvalidSignUp(format!("malformed email address: {email:?}"))
        })?;

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::InvalidSignUp(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        if self.accounts.contains_key(&email) {
            return Err(AuthError::EmailTaken(email));
        }

        let password_hash = hash_password(password)?;

        match self.accounts.entry(email.clone()) {
            Entry::Occupied(_) => Err(AuthError::EmailTaken(email)),
            Entry::Vacant(slot) => {
                let user = User::from_profile(Uuid::new_v4(), email, profile);
                slot.insert(Account {
                    user: user.clone(),
                    password_hash,
                });
                Ok(user)
            }
        }
    }

    /// Number of sessions currently open
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AuthError> {
        Ok(self.sessions.get(access_token).map(|user| Session {
            access_token: access_token.to_string(),
            user: user.clone(),
        }))
    }

    fn on_session_change(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidCredentials)?;

        let user = {
            let account = self
                .accounts
                .get(&email)
                .ok_or(AuthError::InvalidCredentials)?;

            if !verify_password(password, &account.password_hash)? {
                return Err(AuthError::InvalidCredentials);
            }
            account.user.clone()
        };

        let access_token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(access_token.clone(), user.clone());
        tracing::info!(user_id = %user.id, "user signed in");
        self.publish(SessionEvent::SignedIn(user.clone()));

        Ok(Session { access_token, user })
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<User, AuthError> {
        let user = self.register(email, password, &profile)?;
        tracing::info!(user_id = %user.id, "account created");
        Ok(user)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        if let Some((_, user)) = self.sessions.remove(access_token) {
            tracing::info!(user_id = %user.id, "user signed out");
            self.publish(SessionEvent::SignedOut(user));
        }
        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Lowercases and trims an email, rejecting obviously malformed ones.
fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }

    Some(email)
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Provider(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::Provider(format!("stored hash unreadable: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;

    fn profile(name: &str) -> Profile {
        Profile {
            name: Some(name.into()),
            role: Some(Role::Customer),
        }
    }

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let provider = InMemoryAuthProvider::new();
        let user = provider
            .sign_up("Maria@Example.com", "secret123", profile("Maria"))
            .await
            .unwrap();
        assert_eq!(user.email, "maria@example.com");

        let session = provider.sign_in("maria@example.com", "secret123").await.unwrap();
        assert_eq!(session.user, user);

        let resolved = provider.get_session(&session.access_token).await.unwrap();
        assert_eq!(resolved, Some(session));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_invalid_credentials() {
        let provider = InMemoryAuthProvider::new();
        provider.register("a@b.com", "secret123", &profile("A")).unwrap();

        let err = provider.sign_in("a@b.com", "nope-nope").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = provider.sign_in("x@b.com", "secret123").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let provider = InMemoryAuthProvider::new();
        provider.register("a@b.com", "secret123", &profile("A")).unwrap();

        let err = provider
            .sign_up("A@B.COM", "another1", profile("B"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken(_)));
        assert_eq!(err.user_message(), crate::auth::errors::REGISTRATION_FAILED_MESSAGE);
    }

    #[test]
    fn weak_sign_up_data_is_rejected() {
        let provider = InMemoryAuthProvider::new();
        assert!(matches!(
            provider.register("not-an-email", "secret123", &profile("A")),
            Err(AuthError::InvalidSignUp(_))
        ));
        assert!(matches!(
            provider.register("a@b.com", "123", &profile("A")),
            Err(AuthError::InvalidSignUp(_))
        ));
    }

    #[tokio::test]
    async fn session_changes_are_published() {
        let provider = InMemoryAuthProvider::new();
        let mut events = provider.on_session_change();
        provider.register("a@b.com", "secret123", &profile("A")).unwrap();

        let session = provider.sign_in("a@b.com", "secret123").await.unwrap();
        provider.sign_out(&session.access_token).await.unwrap();

        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedIn(session.user.clone()));
        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedOut(session.user));
        assert_eq!(provider.active_sessions(), 0);
        assert!(provider.get_session(&session.access_token).await.unwrap().is_none());
    }
}
