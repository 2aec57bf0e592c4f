//! Error types for Flick N Roll

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown email and wrong password share this variant and message.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Session record is incomplete")]
    PartialRecord,

    #[error("Session token for '{token_user}' does not match stored user '{stored_user}'")]
    RecordMismatch {
        token_user: String,
        stored_user: String,
    },

    #[error("Session expired")]
    SessionExpired,

    #[error("Session restore timed out after {0}ms")]
    RestoreTimeout(u64),

    #[error("Unknown role '{0}'")]
    UnknownRole(String),

    #[error("Config file not found. Run 'flicknroll init' first.")]
    ConfigNotFound,

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
