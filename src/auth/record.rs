//! The persisted session record

use crate::auth::cipher;
use crate::auth::models::Principal;
use crate::auth::token::{self, Claims};
use crate::error::{Error, Result};
use crate::storage::{SessionStore, AUTH_TOKEN_KEY, SESSION_KEYS, USER_KEY};
use serde::{Deserialize, Serialize};

/// Both sealed values of a session, always read and written together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Sealed session token
    #[serde(rename = "authToken")]
    pub auth_token: String,
    /// Sealed principal
    pub user: String,
}

impl SessionRecord {
    /// Issue a token for `principal` and seal both values
    pub fn seal(principal: &Principal, ttl: chrono::Duration) -> Result<Self> {
        let token = token::issue_token(&principal.email, ttl)?;
        Self::seal_with_token(principal, &token)
    }

    /// Seal `principal` alongside an already issued token
    pub fn seal_with_token(principal: &Principal, token: &str) -> Result<Self> {
        Ok(Self {
            auth_token: cipher::seal_json(&token)?,
            user: cipher::seal_json(principal)?,
        })
    }

    /// Decrypt and cross-check both values
    pub fn open(&self) -> Result<(Claims, Principal)> {
        let token: String = cipher::open_json(&self.auth_token)?;
        let principal: Principal = cipher::open_json(&self.user)?;
        let claims = token::decode_token(&token)?;

        if principal.email.is_empty() {
            return Err(Error::Other("Stored user has no email".to_string()));
        }
        if claims.user != principal.email {
            return Err(Error::RecordMismatch {
                token_user: claims.user,
                stored_user: principal.email,
            });
        }

        Ok((claims, principal))
    }

    /// Read the record; `None` when neither key is present
    pub async fn load<S: SessionStore>(store: &S) -> Result<Option<Self>> {
        let mut values = store.load(&SESSION_KEYS).await?.into_iter();
        let auth_token = values.next().flatten();
        let user = values.next().flatten();

        match (auth_token, user) {
            (Some(auth_token), Some(user)) => Ok(Some(Self { auth_token, user })),
            (None, None) => Ok(None),
            _ => Err(Error::PartialRecord),
        }
    }

    /// Write both keys in one store operation
    pub async fn save<S: SessionStore>(&self, store: &S) -> Result<()> {
        store
            .store_all(&[
                (AUTH_TOKEN_KEY, self.auth_token.clone()),
                (USER_KEY, self.user.clone()),
            ])
            .await
    }

    /// Remove both keys in one store operation
    pub async fn clear<S: SessionStore>(store: &S) -> Result<()> {
        store.remove_all(&SESSION_KEYS).await
    }
}
