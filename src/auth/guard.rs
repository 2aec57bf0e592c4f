//! Role gate for role-restricted views

use crate::auth::models::{Principal, Role};

/// Outcome of a route guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// No session: send the user to the login entry point
    RedirectToLogin,
    /// Signed in with the wrong role: send the user to the landing page
    RedirectToLanding,
}

/// True iff a principal is present and its role is in `allowed_roles`
pub fn authorize(principal: Option<&Principal>, allowed_roles: &[Role]) -> bool {
    principal.is_some_and(|p| allowed_roles.contains(&p.role))
}

/// Decide what a role-restricted view should do for `principal`
pub fn guard(principal: Option<&Principal>, allowed_roles: &[Role]) -> Access {
    match principal {
        None => Access::RedirectToLogin,
        Some(p) if allowed_roles.contains(&p.role) => Access::Granted,
        Some(p) => {
            tracing::debug!(email = %p.email, role = %p.role, "Authorization denied");
            Access::RedirectToLanding
        }
    }
}
