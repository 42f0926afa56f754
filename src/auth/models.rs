//! Auth Domain Models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name used when the identity provider has none on file
pub const DEFAULT_USER_NAME: &str = "Customer";

/// What a signed-in user may do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

/// Profile metadata stored alongside an identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub role: Option<Role>,
}

/// A signed-in user, as seen by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl User {
    /// Builds a user from provider data, filling in profile defaults.
    pub fn from_profile(id: Uuid, email: impl Into<String>, profile: &Profile) -> Self {
        let name = profile
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_USER_NAME);

        Self {
            id,
            email: email.into(),
            name: name.to_string(),
            role: profile.role.unwrap_or_default(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// An authenticated session issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

/// Published whenever a session starts or ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(User),
    SignedOut(User),
}

// =============================================================================
// Request payloads
// =============================================================================

/// Body of `POST /auth/sign-in`
#[derive(Debug, Deserialize)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/sign-up`
#[derive(Debug, Deserialize)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}
