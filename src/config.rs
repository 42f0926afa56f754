//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_HOST` - Bind address (default: 0.0.0.0)
//! - `STOREFRONT_PORT` - Listen port (default: 8000)
//! - `STOREFRONT_CHECKOUT_DELAY_MS` - Simulated order service latency (default: 2000)
//! - `STOREFRONT_CHECKOUT_MAX_ATTEMPTS` - Order submission attempts (default: 3)
//! - `STOREFRONT_CHECKOUT_BACKOFF_MS` - First retry delay, doubled per retry (default: 250)
//! - `STOREFRONT_SESSION_PRUNE_SECS` - How often empty cart sessions are dropped (default: 300)
//! - `STOREFRONT_CATALOG_SEED` - Seed for a reproducible product catalog
//! - `STOREFRONT_ADMIN_EMAIL` / `STOREFRONT_ADMIN_PASSWORD` - Seed an admin account (set both or neither)

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::checkout::RetryPolicy;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("{0} requires {1} to be set as well")]
    Incomplete(String, String),
}

/// Credentials for the admin account created at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// How long the simulated order service takes to accept an order
    pub checkout_delay: Duration,
    pub retry: RetryPolicy,
    /// Interval between sweeps that drop empty cart sessions
    pub session_prune_interval: Duration,
    /// Fixed seed for the generated catalog; random when unset
    pub catalog_seed: Option<u64>,
    pub admin: Option<AdminSeed>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            checkout_delay: Duration::from_millis(2000),
            retry: RetryPolicy::default(),
            session_prune_interval: Duration::from_secs(300),
            catalog_seed: None,
            admin: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env file is fine.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = parse_or(&lookup, "STOREFRONT_HOST", defaults.host)?;
        let port = parse_or(&lookup, "STOREFRONT_PORT", defaults.port)?;
        let delay_ms = parse_or(&lookup, "STOREFRONT_CHECKOUT_DELAY_MS", 2000u64)?;
        let max_attempts = parse_or(
            &lookup,
            "STOREFRONT_CHECKOUT_MAX_ATTEMPTS",
            defaults.retry.max_attempts,
        )?;
        let backoff_ms = parse_or(&lookup, "STOREFRONT_CHECKOUT_BACKOFF_MS", 250u64)?;
        let prune_secs = parse_or(&lookup, "STOREFRONT_SESSION_PRUNE_SECS", 300u64)?;
        let catalog_seed = parse_optional(&lookup, "STOREFRONT_CATALOG_SEED")?;

        if max_attempts == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_CHECKOUT_MAX_ATTEMPTS".into(),
                "must be at least 1".into(),
            ));
        }
        if prune_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_SESSION_PRUNE_SECS".into(),
                "must be at least 1".into(),
            ));
        }

        let admin = match (
            non_empty(&lookup, "STOREFRONT_ADMIN_EMAIL"),
            non_empty(&lookup, "STOREFRONT_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::Incomplete(
                    "STOREFRONT_ADMIN_EMAIL".into(),
                    "STOREFRONT_ADMIN_PASSWORD".into(),
                ))
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete(
                    "STOREFRONT_ADMIN_PASSWORD".into(),
                    "STOREFRONT_ADMIN_EMAIL".into(),
                ))
            }
        };

        Ok(Self {
            host,
            port,
            checkout_delay: Duration::from_millis(delay_ms),
            retry: RetryPolicy {
                max_attempts,
                base_backoff: Duration::from_millis(backoff_ms),
            },
            session_prune_interval: Duration::from_secs(prune_secs),
            catalog_seed,
            admin,
        })
    }

    /// Get the socket address to bind to.
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    non_empty(lookup, key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("STOREFRONT_HOST", "127.0.0.1"),
            ("STOREFRONT_PORT", "3000"),
            ("STOREFRONT_CHECKOUT_DELAY_MS", "0"),
            ("STOREFRONT_CHECKOUT_MAX_ATTEMPTS", "5"),
            ("STOREFRONT_CATALOG_SEED", "42"),
            ("STOREFRONT_SESSION_PRUNE_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.checkout_delay, Duration::ZERO);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.catalog_seed, Some(42));
        assert_eq!(config.session_prune_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_values() {
        let err = StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));

        let err = StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_CHECKOUT_MAX_ATTEMPTS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));

        let err = StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_SESSION_PRUNE_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_SESSION_PRUNE_SECS"));
    }

    #[test]
    fn test_admin_seed_requires_both_vars() {
        let err = StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_ADMIN_EMAIL", "admin@shop.test")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Incomplete(..)));

        let config = StorefrontConfig::from_lookup(lookup(&[
            ("STOREFRONT_ADMIN_EMAIL", "admin@shop.test"),
            ("STOREFRONT_ADMIN_PASSWORD", "hunter22"),
        ]))
        .unwrap();
        let admin = config.admin.unwrap();
        assert_eq!(admin.email, "admin@shop.test");
        assert!(!format!("{admin:?}").contains("hunter22"));
    }
}
