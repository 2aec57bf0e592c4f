//! Session management
//!
//! One `SessionManager` is built at startup and handed to every consumer.
//!
//! ```text
//! Initializing --restore--> Unauthenticated | Authenticated
//! Unauthenticated --login--> Authenticated
//! Authenticated --logout--> Unauthenticated
//! ```
//!
//! `Initializing` is never re-entered by the same instance.

use crate::auth::directory::{CredentialDirectory, CredentialVerifier};
use crate::auth::models::{LoginRequest, Principal};
use crate::auth::record::SessionRecord;
use crate::auth::token;
use crate::config::{ExpiryPolicy, SessionConfig};
use crate::error::{Error, Result};
use crate::storage::SessionStore;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Where the session currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup restore has not resolved yet
    Initializing,
    Unauthenticated,
    Authenticated(Principal),
}

impl SessionState {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionState::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }
}

struct Inner<S, V> {
    store: S,
    verifier: V,
    settings: SessionConfig,
    state: RwLock<SessionState>,
    /// Held for the whole of restore, login and logout so their storage
    /// writes apply in the same order as their state changes
    transition: Mutex<()>,
}

/// Owns authentication state and the persisted session record
pub struct SessionManager<S, V = CredentialDirectory> {
    inner: Arc<Inner<S, V>>,
}

impl<S, V> Clone for SessionManager<S, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SessionStore> SessionManager<S, CredentialDirectory> {
    /// Create a session manager backed by the built-in credential directory
    pub fn new(store: S, settings: SessionConfig) -> Self {
        Self::with_verifier(store, CredentialDirectory::new(), settings)
    }
}

impl<S: SessionStore, V: CredentialVerifier> SessionManager<S, V> {
    pub fn with_verifier(store: S, verifier: V, settings: SessionConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                verifier,
                settings,
                state: RwLock::new(SessionState::Initializing),
                transition: Mutex::new(()),
            }),
        }
    }

    pub fn store(&self) -> &S {
        &self.inner.store
    }

    pub fn settings(&self) -> &SessionConfig {
        &self.inner.settings
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.read().clone()
    }

    /// True until the startup restore resolves
    pub fn is_loading(&self) -> bool {
        matches!(*self.inner.state.read(), SessionState::Initializing)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.inner.state.read(), SessionState::Authenticated(_))
    }

    /// The in-memory principal; storage is not consulted
    pub fn current_principal(&self) -> Option<Principal> {
        self.inner.state.read().principal().cloned()
    }

    /// Restore a prior session from storage.
    ///
    /// Only the first call on an instance reads storage; later calls return
    /// the in-memory principal. Never fails: anything wrong with the stored
    /// record means "not authenticated". A login or logout issued while
    /// the restore runs waits for it to resolve.
    pub async fn restore(&self) -> Option<Principal> {
        let _transition = self.inner.transition.lock().await;
        if !self.is_loading() {
            tracing::debug!("Session already initialized, skipping restore");
            return self.current_principal();
        }

        let timeout = self.inner.settings.restore_timeout();
        let restored = match tokio::time::timeout(timeout, self.read_record()).await {
            Ok(Ok(restored)) => restored,
            Ok(Err(e)) => {
                tracing::warn!("Discarding stored session: {}", e);
                self.clear_record().await;
                None
            }
            Err(_) => {
                let e = Error::RestoreTimeout(self.inner.settings.restore_timeout_ms);
                tracing::warn!("{}", e);
                None
            }
        };

        self.resolve_initializing(restored)
    }

    async fn read_record(&self) -> Result<Option<Principal>> {
        let Some(record) = SessionRecord::load(&self.inner.store).await? else {
            tracing::debug!("No stored session");
            return Ok(None);
        };

        let (claims, principal) = record.open()?;

        if claims.is_expired() {
            match self.inner.settings.expiry_policy {
                ExpiryPolicy::Reject => return Err(Error::SessionExpired),
                ExpiryPolicy::Renew => {
                    tracing::info!(email = %principal.email, "Renewing expired session token");
                    if let Err(e) = self.persist(&principal).await {
                        tracing::warn!("Failed to renew session token: {}", e);
                    }
                }
                ExpiryPolicy::Ignore => {
                    tracing::debug!(email = %principal.email, "Restoring session with expired token");
                }
            }
        }

        tracing::info!(email = %principal.email, role = %principal.role, "Restored session");
        Ok(Some(principal))
    }

    fn resolve_initializing(&self, restored: Option<Principal>) -> Option<Principal> {
        let mut state = self.inner.state.write();
        if matches!(*state, SessionState::Initializing) {
            *state = match restored {
                Some(principal) => SessionState::Authenticated(principal),
                None => SessionState::Unauthenticated,
            };
        }
        state.principal().cloned()
    }

    /// Check credentials and start a session.
    ///
    /// Unknown email and wrong password both yield
    /// [`Error::InvalidCredentials`]. A failure to persist the record is
    /// logged; the in-memory session still starts.
    pub async fn login(&self, email: &str, password: &str) -> Result<Principal> {
        let Some(principal) = self.inner.verifier.verify(email, password) else {
            tracing::warn!("Rejected login attempt");
            return Err(Error::InvalidCredentials);
        };

        let _transition = self.inner.transition.lock().await;
        if let Err(e) = self.persist(&principal).await {
            tracing::warn!("Failed to persist session: {}", e);
        }

        *self.inner.state.write() = SessionState::Authenticated(principal.clone());
        tracing::info!(email = %principal.email, role = %principal.role, "Logged in");

        Ok(principal)
    }

    /// [`login`](Self::login) with credentials as submitted by the login form
    pub async fn login_with(&self, request: &LoginRequest) -> Result<Principal> {
        self.login(&request.email, &request.password).await
    }

    /// End the session. Calling it without a session is a no-op.
    pub async fn logout(&self) {
        let _transition = self.inner.transition.lock().await;
        self.clear_record().await;

        let previous = std::mem::replace(
            &mut *self.inner.state.write(),
            SessionState::Unauthenticated,
        );
        if let SessionState::Authenticated(principal) = previous {
            tracing::info!(email = %principal.email, "Logged out");
        }
    }

    /// The record as currently persisted, for export or inspection
    pub async fn persisted_record(&self) -> Result<Option<SessionRecord>> {
        SessionRecord::load(&self.inner.store).await
    }

    async fn persist(&self, principal: &Principal) -> Result<()> {
        let token = token::issue_token(&principal.email, self.inner.settings.ttl()?)?;
        SessionRecord::seal_with_token(principal, &token)?
            .save(&self.inner.store)
            .await
    }

    async fn clear_record(&self) {
        if let Err(e) = SessionRecord::clear(&self.inner.store).await {
            tracing::warn!("Failed to clear stored session: {}", e);
        }
    }
}
