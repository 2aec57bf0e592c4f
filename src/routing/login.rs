//! Login view flow

use super::Route;
use crate::auth::{CredentialVerifier, LoginRequest, SessionManager};
use crate::error::Error;
use crate::storage::SessionStore;

/// Shown for any rejected email/password pair
pub const LOGIN_ERROR_MESSAGE: &str = "Invalid email or password";
/// Shown when login fails for a reason other than credentials
pub const LOGIN_FAILURE_MESSAGE: &str = "An error occurred during login";

/// Result of submitting the login form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Redirect(Route),
    Error(String),
}

/// Drives the login form against a session manager
pub struct LoginFlow<'a, S, V> {
    sessions: &'a SessionManager<S, V>,
}

impl<'a, S: SessionStore, V: CredentialVerifier> LoginFlow<'a, S, V> {
    pub fn new(sessions: &'a SessionManager<S, V>) -> Self {
        Self { sessions }
    }

    /// Where the login page sends an already signed-in user, if anywhere
    pub fn on_enter(&self) -> Option<Route> {
        self.sessions
            .is_authenticated()
            .then_some(Route::Dashboard)
    }

    pub async fn submit(&self, request: &LoginRequest) -> LoginOutcome {
        match self.sessions.login_with(request).await {
            Ok(_) => LoginOutcome::Redirect(Route::Dashboard),
            Err(Error::InvalidCredentials) => LoginOutcome::Error(LOGIN_ERROR_MESSAGE.to_string()),
            Err(e) => {
                tracing::error!("Login failed: {}", e);
                LoginOutcome::Error(LOGIN_FAILURE_MESSAGE.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::storage::MemoryStore;

    #[test]
    fn test_message_matches_error() {
        assert_eq!(Error::InvalidCredentials.to_string(), LOGIN_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_submit() {
        let sessions = SessionManager::new(MemoryStore::new(), SessionConfig::default());
        sessions.restore().await;
        let flow = LoginFlow::new(&sessions);
        assert_eq!(flow.on_enter(), None);

        assert_eq!(
            flow.submit(&LoginRequest::new("member@flicknroll.com", "nope")).await,
            LoginOutcome::Error(LOGIN_ERROR_MESSAGE.to_string())
        );
        assert_eq!(
            flow.submit(&LoginRequest::new("member@flicknroll.com", "fnr25")).await,
            LoginOutcome::Redirect(Route::Dashboard)
        );
        assert_eq!(flow.on_enter(), Some(Route::Dashboard));
    }
}
