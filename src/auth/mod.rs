//! Authentication and session management

pub mod cipher;
pub mod directory;
pub mod guard;
pub mod models;
pub mod record;
pub mod session;
pub mod token;

pub use directory::{CredentialDirectory, CredentialVerifier};
pub use guard::{authorize, guard, Access};
pub use models::{AccountInfo, LoginRequest, Principal, Role};
pub use record::SessionRecord;
pub use session::{SessionManager, SessionState};
pub use token::{decode_token, issue_token, Claims};
