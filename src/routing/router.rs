//! Role router and route guard

use super::{Navigation, Route, View};
use crate::auth::{guard, Access, Principal, Role};
use crate::config::RoutesConfig;

/// Picks the dashboard view for a role
pub struct RoleRouter;

impl RoleRouter {
    pub fn dashboard_for(role: Role) -> View {
        match role {
            Role::Admin => View::AdminDashboard,
            Role::Manager => View::ManagerDashboard,
            Role::Member => View::MemberDashboard,
        }
    }

    /// Route on a role as stored; anything unrecognised goes back to login
    pub fn dashboard_for_raw(role: &str) -> Navigation {
        match role.parse::<Role>() {
            Ok(role) => Navigation::Render(Self::dashboard_for(role)),
            Err(e) => {
                tracing::warn!("{}, redirecting to login", e);
                Navigation::Redirect(Route::Login)
            }
        }
    }
}

/// Resolves paths to views for the current principal
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    routes: RoutesConfig,
}

/// Upper bound on redirects followed by [`Navigator::resolve`]
const MAX_REDIRECTS: usize = 8;

impl Navigator {
    pub fn new(routes: RoutesConfig) -> Self {
        for name in routes.allowed.keys() {
            let restrictable = Route::ALL
                .iter()
                .any(|r| r.name() == name && r.is_restrictable());
            if !restrictable {
                tracing::warn!(route = %name, "Ignoring role restriction on unrestrictable route");
            }
        }
        Self { routes }
    }

    /// Roles admitted to `route`
    pub fn allowed_roles(&self, route: Route) -> Vec<Role> {
        if route.is_restrictable() {
            self.routes.allowed_roles(route.name())
        } else {
            Role::ALL.to_vec()
        }
    }

    /// One navigation step for `path`
    pub fn open(&self, path: &str, principal: Option<&Principal>) -> Navigation {
        let Some(route) = Route::from_path(path) else {
            tracing::debug!(path, "Unknown path");
            return Navigation::Redirect(Route::Root);
        };

        match (route, principal) {
            (Route::Login, Some(_)) => Navigation::Redirect(Route::Dashboard),
            (Route::Login, None) => Navigation::Render(View::Login),
            (_, None) => Navigation::Redirect(Route::Login),
            (Route::Root, Some(_)) => Navigation::Redirect(Route::Dashboard),
            (Route::Dashboard, Some(p)) => Navigation::Render(RoleRouter::dashboard_for(p.role)),
            (Route::Bookings, Some(p)) => self.guarded(Route::Bookings, View::Bookings, p),
            (Route::Inventory, Some(p)) => self.guarded(Route::Inventory, View::Inventory, p),
            (Route::Members, Some(p)) => self.guarded(Route::Members, View::Members, p),
            (Route::Reports, Some(p)) => self.guarded(Route::Reports, View::Reports, p),
        }
    }

    fn guarded(&self, route: Route, view: View, principal: &Principal) -> Navigation {
        match guard(Some(principal), &self.allowed_roles(route)) {
            Access::Granted => Navigation::Render(view),
            Access::RedirectToLogin => Navigation::Redirect(Route::Login),
            Access::RedirectToLanding => Navigation::Redirect(Route::Root),
        }
    }

    /// Follow redirects from `path` until a view renders
    pub fn resolve(&self, path: &str, principal: Option<&Principal>) -> (Route, View) {
        let mut current = path.to_string();
        for _ in 0..MAX_REDIRECTS {
            match self.open(&current, principal) {
                Navigation::Render(view) => {
                    let route = Route::from_path(&current).unwrap_or(Route::Root);
                    return (route, view);
                }
                Navigation::Redirect(next) => {
                    tracing::debug!(from = %current, to = %next, "Redirect");
                    current = next.path().to_string();
                }
            }
        }
        tracing::warn!(path, "Too many redirects, falling back to login");
        (Route::Login, View::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal::new("Test", "test@flicknroll.com", role)
    }

    #[test]
    fn test_dashboard_per_role() {
        assert_eq!(RoleRouter::dashboard_for(Role::Admin), View::AdminDashboard);
        assert_eq!(RoleRouter::dashboard_for(Role::Manager), View::ManagerDashboard);
        assert_eq!(RoleRouter::dashboard_for(Role::Member), View::MemberDashboard);
    }

    #[test]
    fn test_unrecognised_role_goes_to_login() {
        assert_eq!(
            RoleRouter::dashboard_for_raw("Owner"),
            Navigation::Redirect(Route::Login)
        );
        assert_eq!(
            RoleRouter::dashboard_for_raw("Admin"),
            Navigation::Render(View::AdminDashboard)
        );
    }

    #[test]
    fn test_root_lands_on_dashboard() {
        let nav = Navigator::default();
        let admin = principal(Role::Admin);
        assert_eq!(nav.open("/", Some(&admin)), Navigation::Redirect(Route::Dashboard));
        assert_eq!(
            nav.resolve("/", Some(&admin)),
            (Route::Dashboard, View::AdminDashboard)
        );
    }

    #[test]
    fn test_landing_routes_ignore_restrictions() {
        let routes = RoutesConfig::default().restrict("dashboard", &[Role::Admin]);
        let nav = Navigator::new(routes);
        let member = principal(Role::Member);
        assert_eq!(
            nav.resolve("/dashboard", Some(&member)),
            (Route::Dashboard, View::MemberDashboard)
        );
    }

    #[test]
    fn test_unknown_path_unauthenticated_reaches_login() {
        let nav = Navigator::default();
        assert_eq!(nav.resolve("/courts", None), (Route::Login, View::Login));
    }
}
