//! Route table and navigation decisions for the dashboard shell
//!
//! The view layer asks this module where to go; it never inspects roles
//! itself.

mod login;
mod router;

pub use login::{LoginFlow, LoginOutcome, LOGIN_ERROR_MESSAGE, LOGIN_FAILURE_MESSAGE};
pub use router::{Navigator, RoleRouter};

use serde::Serialize;
use std::fmt;

/// Every route the dashboard knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Login,
    Root,
    Dashboard,
    Bookings,
    Inventory,
    Members,
    Reports,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Login,
        Route::Root,
        Route::Dashboard,
        Route::Bookings,
        Route::Inventory,
        Route::Members,
        Route::Reports,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Root => "/",
            Route::Dashboard => "/dashboard",
            Route::Bookings => "/bookings",
            Route::Inventory => "/inventory",
            Route::Members => "/members",
            Route::Reports => "/reports",
        }
    }

    /// Name used for per-route settings in the config file
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "login",
            Route::Root => "root",
            Route::Dashboard => "dashboard",
            Route::Bookings => "bookings",
            Route::Inventory => "inventory",
            Route::Members => "members",
            Route::Reports => "reports",
        }
    }

    /// Match a path exactly, ignoring a single trailing slash
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(rest) => rest,
        };
        Route::ALL.into_iter().find(|r| r.path() == trimmed)
    }

    /// Routes whose access can be narrowed to a set of roles.
    /// Login and the landing routes always stay reachable.
    pub fn is_restrictable(&self) -> bool {
        matches!(
            self,
            Route::Bookings | Route::Inventory | Route::Members | Route::Reports
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Top-level views the shell can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Login,
    AdminDashboard,
    ManagerDashboard,
    MemberDashboard,
    Bookings,
    Inventory,
    Members,
    Reports,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Login => "Login",
            View::AdminDashboard => "Admin Dashboard",
            View::ManagerDashboard => "Manager Dashboard",
            View::MemberDashboard => "Member Dashboard",
            View::Bookings => "Bookings",
            View::Inventory => "Inventory",
            View::Members => "Members",
            View::Reports => "Reports",
        };
        f.write_str(name)
    }
}

/// What the shell should do for a requested path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Navigation {
    Render(View),
    Redirect(Route),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Root));
        assert_eq!(Route::from_path("/login"), Some(Route::Login));
        assert_eq!(Route::from_path("/reports/"), Some(Route::Reports));
        assert_eq!(Route::from_path("/Reports"), None);
        assert_eq!(Route::from_path("/courts"), None);
        assert_eq!(Route::from_path(""), None);
    }

    #[test]
    fn test_paths_unique() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }
}
