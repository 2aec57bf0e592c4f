//! Session token handling

use crate::error::{Error, Result};
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const TOKEN_SECRET: &[u8] = b"flicknroll-session-token-static-key";

/// Default token lifetime
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// Token claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Authenticated email
    pub user: String,
    /// Absolute expiry, epoch milliseconds
    pub exp: i64,
}

impl Claims {
    /// Claims for `email` expiring `ttl` after `now_ms`.
    ///
    /// `ttl` must be positive and the expiry must fit in epoch millis.
    pub fn new(email: &str, now_ms: i64, ttl: Duration) -> Result<Self> {
        if ttl <= Duration::zero() {
            return Err(Error::Config(format!("Token lifetime must be positive, got {}", ttl)));
        }
        let exp = now_ms
            .checked_add(ttl.num_milliseconds())
            .ok_or_else(|| Error::Config(format!("Token lifetime too large: {}", ttl)))?;

        Ok(Self {
            user: email.to_string(),
            exp,
        })
    }

    /// Check if the token is expired at `now_ms`
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.exp
    }

    /// Check if the token is expired now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp_millis())
    }
}

/// Issue a token for `email` valid for `ttl` from now
pub fn issue_token(email: &str, ttl: Duration) -> Result<String> {
    let claims = Claims::new(email, chrono::Utc::now().timestamp_millis(), ttl)?;
    encode_claims(&claims)
}

/// Sign an explicit set of claims
pub fn encode_claims(claims: &Claims) -> Result<String> {
    let token = encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TOKEN_SECRET),
    )?;
    Ok(token)
}

/// Verify the signature and decode the claims.
///
/// `exp` is in milliseconds, so expiry is left to the caller's policy
/// rather than the JWT library's seconds-based check.
pub fn decode_token(token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(TOKEN_SECRET), &validation)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_decode_token() {
        let token = issue_token("admin@flicknroll.com", Duration::hours(24)).expect("issue");
        let claims = decode_token(&token).expect("decode");

        assert_eq!(claims.user, "admin@flicknroll.com");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expiry_is_24h_in_millis() {
        let now = 1_700_000_000_000;
        let claims =
            Claims::new("member@flicknroll.com", now, Duration::hours(DEFAULT_TTL_HOURS)).unwrap();
        assert_eq!(claims.exp - now, 24 * 60 * 60 * 1000);
        assert!(!claims.is_expired_at(now));
        assert!(claims.is_expired_at(claims.exp));
    }

    #[test]
    fn test_lifetime_must_be_positive_and_fit() {
        let now = 1_700_000_000_000;
        assert!(Claims::new("a@flicknroll.com", now, Duration::zero()).is_err());
        assert!(Claims::new("a@flicknroll.com", now, Duration::hours(-1)).is_err());
        assert!(Claims::new("a@flicknroll.com", i64::MAX - 10, Duration::hours(1)).is_err());
        assert!(issue_token("a@flicknroll.com", Duration::MAX).is_err());
    }

    #[test]
    fn test_expired_claims_still_decode() {
        let claims = Claims {
            user: "manager@flicknroll.com".to_string(),
            exp: 1,
        };
        let token = encode_claims(&claims).expect("encode");
        let decoded = decode_token(&token).expect("decode");
        assert_eq!(decoded, claims);
        assert!(decoded.is_expired());
    }

    #[test]
    fn test_invalid_token() {
        assert!(decode_token("invalid.token.here").is_err());
        assert!(decode_token("not-a-token").is_err());
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let token = issue_token("admin@flicknroll.com", Duration::hours(1)).expect("issue");
        let mut chars: Vec<char> = token.chars().collect();
        let idx = chars.len() - 5;
        chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();
        assert!(decode_token(&tampered).is_err());
    }
}
