//! Authentication models

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles known to the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Administrator - full facility management
    Admin,
    /// Manager - day-to-day operations
    Manager,
    /// Member - club member self-service
    Member,
}

impl Role {
    /// Every defined role, in privilege order
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Member];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Member => "Member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    /// Exact match on the persisted form; no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "Manager" => Ok(Role::Manager),
            "Member" => Ok(Role::Member),
            other => Err(Error::UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Display name
    pub name: String,
    /// Email address, unique per account
    pub email: String,
    /// Role used for routing and route guards
    pub role: Role,
}

impl Principal {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}

/// Login credentials as collected by the login form
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account information safe to display (no password)
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<Principal> for AccountInfo {
    fn from(principal: Principal) -> Self {
        Self {
            name: principal.name,
            email: principal.email,
            role: principal.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_form() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
        assert_eq!(serde_json::to_string(&Role::Member).unwrap(), "\"Member\"");
        let role: Role = serde_json::from_str("\"Manager\"").unwrap();
        assert_eq!(role, Role::Manager);
    }

    #[test]
    fn test_role_parse_is_exact() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("admin".parse::<Role>().is_err());
        assert!("Guest".parse::<Role>().is_err());
    }

    #[test]
    fn test_login_request_debug_redacts_password() {
        let req = LoginRequest::new("admin@flicknroll.com", "fnr25");
        let debug = format!("{:?}", req);
        assert!(debug.contains("admin@flicknroll.com"));
        assert!(!debug.contains("fnr25"));
    }
}
