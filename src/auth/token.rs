// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs asserting `(user id, role)` for one hour, signed
//! with a process-wide secret loaded once at startup. The role claim is a
//! snapshot from login; authorization always re-resolves the user against
//! the store (see `extractor`), so a server-side role change takes effect
//! on the next request, not at the next login.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{AuthError, Role};

/// Token lifetime: one hour from issuance.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user id.
    pub sub: String,
    /// Role at issuance time. Informational only; never authoritative.
    pub role: Role,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiry (Unix timestamp), `iat + TOKEN_TTL_SECS`.
    pub exp: i64,
}

/// Process-wide signing keys, derived from the configured secret.
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Issue a signed session token for a user.
pub fn issue_token(
    user_id: &str,
    role: Role,
    keys: &AuthKeys,
) -> Result<String, jsonwebtoken::errors::Error> {
    issue_token_at(user_id, role, Utc::now().timestamp(), keys)
}

/// Issue a token with an explicit issuance instant.
pub(crate) fn issue_token_at(
    user_id: &str,
    role: Role,
    issued_at: i64,
    keys: &AuthKeys,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = TokenClaims {
        sub: user_id.to_string(),
        role,
        iat: issued_at,
        exp: issued_at + TOKEN_TTL_SECS,
    };
    encode(&Header::default(), &claims, &keys.encoding)
}

/// Verify a token's signature and expiry and return its claims.
///
/// Every token-level failure maps to [`AuthError::InvalidToken`].
pub fn verify_token(token: &str, keys: &AuthKeys) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = CLOCK_SKEW_LEEWAY;

    decode::<TokenClaims>(token, &keys.decoding, &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys() -> AuthKeys {
        AuthKeys::from_secret(b"test-signing-secret")
    }

    #[test]
    fn issue_then_verify_roundtrip() {
        let keys = test_keys();
        let token = issue_token("user_123", Role::Author, &keys).expect("issuance succeeds");

        let claims = verify_token(&token, &keys).expect("verification succeeds");
        assert_eq!(claims.sub, "user_123");
        assert_eq!(claims.role, Role::Author);
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token_fails_as_invalid_token() {
        let keys = test_keys();
        let issued_at = Utc::now().timestamp() - 2 * TOKEN_TTL_SECS;
        let token =
            issue_token_at("user_123", Role::Reader, issued_at, &keys).expect("issuance succeeds");

        assert_eq!(verify_token(&token, &keys), Err(AuthError::InvalidToken));
    }

    #[test]
    fn foreign_signature_fails_as_invalid_token() {
        let keys = test_keys();
        let other_keys = AuthKeys::from_secret(b"some-other-secret");
        let token = issue_token("user_123", Role::Reader, &other_keys).expect("issuance succeeds");

        assert_eq!(verify_token(&token, &keys), Err(AuthError::InvalidToken));
    }

    #[test]
    fn garbage_token_fails_as_invalid_token() {
        let keys = test_keys();
        assert_eq!(
            verify_token("definitely.not.a-jwt", &keys),
            Err(AuthError::InvalidToken)
        );
    }
}
