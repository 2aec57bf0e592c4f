//! Obfuscation of the persisted session record.
//!
//! AES-256-GCM under a key compiled into the binary. Anyone holding the
//! binary holds the key, so this is obfuscation at rest and nothing more.
//! A blob that fails to open is simply "no session".

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

/// The size of the AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;
/// The size of the AES-GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;

const STATIC_KEY: &[u8; KEY_SIZE] = b"flicknroll-dashboard-session-key";

fn cipher() -> Aes256Gcm {
    Aes256Gcm::new(STATIC_KEY.into())
}

/// Encrypts `plaintext` and returns base64(nonce || ciphertext).
pub fn seal(plaintext: &[u8]) -> Result<String> {
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher()
        .encrypt(&nonce, plaintext)
        .map_err(|e| Error::Encryption(format!("Encryption failed: {}", e)))?;

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(nonce.as_slice());
    blob.extend_from_slice(&ciphertext);

    Ok(general_purpose::STANDARD.encode(blob))
}

/// Reverses [`seal`]. Fails on bad base64, truncated input or a tag mismatch.
pub fn open(sealed: &str) -> Result<Vec<u8>> {
    let blob = general_purpose::STANDARD
        .decode(sealed.trim())
        .map_err(|e| Error::Encryption(format!("Invalid encoding: {}", e)))?;

    if blob.len() <= NONCE_SIZE {
        return Err(Error::Encryption("Sealed data too short".to_string()));
    }

    let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);

    cipher()
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|e| Error::Encryption(format!("Decryption failed: {}", e)))
}

/// Serialize `value` as JSON and seal it.
pub fn seal_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value)?;
    seal(&json)
}

/// Open a sealed blob and parse it as JSON.
pub fn open_json<T: DeserializeOwned>(sealed: &str) -> Result<T> {
    let json = open(sealed)?;
    Ok(serde_json::from_slice(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open() {
        let sealed = seal(b"courts and bookings").expect("seal");
        assert_ne!(sealed.as_bytes(), b"courts and bookings");
        assert_eq!(open(&sealed).expect("open"), b"courts and bookings");
    }

    #[test]
    fn test_nonce_differs_per_seal() {
        let a = seal(b"same").expect("seal");
        let b = seal(b"same").expect("seal");
        assert_ne!(a, b);
    }

    #[test]
    fn test_open_rejects_flipped_bits() {
        let sealed = seal(b"{\"name\":\"Admin User\"}").expect("seal");
        let mut raw = general_purpose::STANDARD.decode(&sealed).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let corrupted = general_purpose::STANDARD.encode(raw);
        assert!(open(&corrupted).is_err());
    }

    #[test]
    fn test_open_rejects_garbage() {
        assert!(open("").is_err());
        assert!(open("not base64 at all!").is_err());
        assert!(open(&general_purpose::STANDARD.encode([0u8; NONCE_SIZE])).is_err());
    }
}
