//! Key-value storage for the persisted session record
//!
//! The record lives under two keys that must never exist apart, so the
//! store only exposes multi-key operations that apply all-or-nothing.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use std::future::Future;

/// Key holding the sealed session token
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Key holding the sealed principal
pub const USER_KEY: &str = "user";
/// Both session keys, in the order they are read and written
pub const SESSION_KEYS: [&str; 2] = [AUTH_TOKEN_KEY, USER_KEY];

/// Origin-scoped key-value storage
pub trait SessionStore: Send + Sync {
    /// Read every key in `keys` from one consistent view of the store
    fn load(&self, keys: &[&str]) -> impl Future<Output = Result<Vec<Option<String>>>> + Send;

    /// Write every entry or none of them
    fn store_all(&self, entries: &[(&str, String)]) -> impl Future<Output = Result<()>> + Send;

    /// Remove every key; absent keys are not an error
    fn remove_all(&self, keys: &[&str]) -> impl Future<Output = Result<()>> + Send;
}
