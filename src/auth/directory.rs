//! Credential directory used to validate login attempts

use crate::auth::models::{Principal, Role};
use subtle::ConstantTimeEq;

/// Checks an email/password pair and yields the matching principal.
///
/// The session manager only talks to this trait, so the static directory
/// can be replaced by a real verifier without touching callers.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> Option<Principal>;
}

struct Account {
    email: &'static str,
    name: &'static str,
    role: Role,
    password: &'static str,
}

const ACCOUNTS: [Account; 3] = [
    Account {
        email: "admin@flicknroll.com",
        name: "Admin User",
        role: Role::Admin,
        password: "fnr25",
    },
    Account {
        email: "manager@flicknroll.com",
        name: "Manager User",
        role: Role::Manager,
        password: "fnr25",
    },
    Account {
        email: "member@flicknroll.com",
        name: "Member User",
        role: Role::Member,
        password: "fnr25",
    },
];

/// The built-in directory: one fixed account per role, plaintext passwords.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialDirectory;

impl CredentialDirectory {
    pub fn new() -> Self {
        Self
    }

    /// All accounts, without passwords
    pub fn accounts(&self) -> Vec<Principal> {
        ACCOUNTS
            .iter()
            .map(|a| Principal::new(a.name, a.email, a.role))
            .collect()
    }
}

impl CredentialVerifier for CredentialDirectory {
    fn verify(&self, email: &str, password: &str) -> Option<Principal> {
        // Email lookup is an exact, case-sensitive key match
        let account = ACCOUNTS.iter().find(|a| a.email == email)?;

        if bool::from(account.password.as_bytes().ct_eq(password.as_bytes())) {
            Some(Principal::new(account.name, account.email, account.role))
        } else {
            None
        }
    }
}
