//! Auth errors.

use thiserror::Error;

/// Shown for any failed sign-in
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "Invalid credentials. Please check your email and password.";

/// Shown for any rejected sign-up
pub const REGISTRATION_FAILED_MESSAGE: &str =
    "Could not create the account. The email may already be in use.";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email already registered: {0}")]
    EmailTaken(String),

    #[error("invalid sign-up data: {0}")]
    InvalidSignUp(String),

    #[error("identity provider failure: {0}")]
    Provider(String),
}

impl AuthError {
    /// The canned message a shopper sees for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            AuthError::EmailTaken(_) | AuthError::InvalidSignUp(_) => REGISTRATION_FAILED_MESSAGE,
            AuthError::Provider(_) => "Authentication service unavailable",
        }
    }
}
