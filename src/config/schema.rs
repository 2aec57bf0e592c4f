//! Configuration schema definitions

use crate::auth::Role;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Session lifecycle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the persisted session record
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Token lifetime in hours
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,

    /// Upper bound on the startup restore, in milliseconds
    #[serde(default = "default_restore_timeout_ms")]
    pub restore_timeout_ms: u64,

    /// What restore does with an expired token
    #[serde(default)]
    pub expiry_policy: ExpiryPolicy,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./.flicknroll/session.json")
}

fn default_ttl_hours() -> i64 {
    crate::auth::token::DEFAULT_TTL_HOURS
}

fn default_restore_timeout_ms() -> u64 {
    5000
}

/// Longest accepted token lifetime, one year
pub const MAX_TTL_HOURS: i64 = 24 * 365;

impl Config {
    /// Reject settings that parse but cannot produce a working session
    pub fn validate(&self) -> Result<()> {
        self.session.validate()
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        self.ttl().map(|_| ())
    }

    /// Token lifetime; `ttl_hours` must be within 1..=MAX_TTL_HOURS
    pub fn ttl(&self) -> Result<chrono::Duration> {
        if !(1..=MAX_TTL_HOURS).contains(&self.ttl_hours) {
            return Err(Error::Config(format!(
                "session.ttl_hours must be between 1 and {}, got {}",
                MAX_TTL_HOURS, self.ttl_hours
            )));
        }
        chrono::TimeDelta::try_hours(self.ttl_hours).ok_or_else(|| {
            Error::Config(format!("session.ttl_hours out of range: {}", self.ttl_hours))
        })
    }

    pub fn restore_timeout(&self) -> Duration {
        Duration::from_millis(self.restore_timeout_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            ttl_hours: default_ttl_hours(),
            restore_timeout_ms: default_restore_timeout_ms(),
            expiry_policy: ExpiryPolicy::default(),
        }
    }
}

/// Handling of an expired token found at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryPolicy {
    /// Treat the session as gone and clear the record
    #[default]
    Reject,
    /// Keep the session and write a freshly issued token
    Renew,
    /// Restore regardless of expiry
    Ignore,
}

/// Per-route role restrictions, keyed by route name (`members`, `reports`, ...).
/// Routes without an entry are open to every authenticated role.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RoutesConfig {
    #[serde(flatten)]
    pub allowed: BTreeMap<String, Vec<Role>>,
}

impl RoutesConfig {
    /// Roles allowed on `route`; every role when unrestricted
    pub fn allowed_roles(&self, route: &str) -> Vec<Role> {
        match self.allowed.get(route) {
            Some(roles) => roles.clone(),
            None => Role::ALL.to_vec(),
        }
    }

    pub fn restrict(mut self, route: &str, roles: &[Role]) -> Self {
        self.allowed.insert(route.to_string(), roles.to_vec());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.session.ttl_hours, 24);
        assert_eq!(config.session.restore_timeout(), Duration::from_secs(5));
        assert_eq!(config.session.expiry_policy, ExpiryPolicy::Reject);
        assert!(config.routes.allowed.is_empty());
    }

    #[test]
    fn test_routes_restrictions() {
        let config: Config = toml::from_str(
            r#"
            [session]
            expiry_policy = "renew"

            [routes]
            reports = ["Admin", "Manager"]
            "#,
        )
        .unwrap();
        assert_eq!(config.session.expiry_policy, ExpiryPolicy::Renew);
        assert_eq!(
            config.routes.allowed_roles("reports"),
            vec![Role::Admin, Role::Manager]
        );
        assert_eq!(config.routes.allowed_roles("bookings"), Role::ALL.to_vec());
    }

    #[test]
    fn test_ttl_bounds() {
        let mut session = SessionConfig::default();
        assert_eq!(session.ttl().unwrap(), chrono::Duration::hours(24));

        for bad in [0, -1, MAX_TTL_HOURS + 1, i64::MAX, i64::MIN] {
            session.ttl_hours = bad;
            assert!(matches!(session.ttl(), Err(Error::Config(_))), "ttl_hours = {}", bad);
        }

        session.ttl_hours = MAX_TTL_HOURS;
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[routes]\nreports = [\"Owner\"]");
        assert!(result.is_err());
    }
}
