// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is the current store record for the token's subject
//! }
//! ```
//!
//! Verification resolves the token's subject against the content store on
//! every request and attaches the resolved record, not the token claims:
//! the role may have changed server-side since issuance, and policy checks
//! must see the current one. There is no cache and no revocation list; a
//! token stays valid for its full hour, and a subject that has vanished
//! from the store simply fails resolution.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{token, AuthError};
use crate::models::User;
use crate::state::AppState;

/// Extractor for authenticated users. Rejects with 401/404 on failure.
pub struct Auth(pub User);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let bearer = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?
            .trim();

        let claims = token::verify_token(bearer, &state.auth)?;

        // One store read per authenticated request; the stored record is
        // authoritative over the token's role snapshot.
        let store = state.store.read().await;
        let user = store
            .user_by_id(&claims.sub)
            .ok_or(AuthError::UserNotFound)?;

        Ok(Auth(user))
    }
}

/// Optional authentication extractor.
///
/// Returns `None` instead of rejecting, for public endpoints whose
/// response depends on who is asking (unpublished post visibility).
pub struct OptionalAuth(pub Option<User>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(user)) => Ok(OptionalAuth(Some(user))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::{issue_token, issue_token_at, AuthKeys, TOKEN_TTL_SECS};
    use crate::auth::Role;
    use crate::store::{InMemoryStore, NewUser};
    use axum::http::Request;
    use chrono::Utc;

    fn test_state() -> AppState {
        AppState::new(
            InMemoryStore::new(),
            AuthKeys::from_secret(b"test-signing-secret"),
        )
    }

    async fn seed_user(state: &AppState, username: &str, role: Role) -> User {
        state
            .store
            .write()
            .await
            .create_user(NewUser {
                username: username.to_string(),
                email: format!("{username}@x.com"),
                password_hash: "digest".to_string(),
                role,
            })
            .expect("user creation succeeds")
    }

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let state = test_state();
        let mut parts = parts_with_header(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn rejects_non_bearer_header() {
        let state = test_state();
        let mut parts = parts_with_header(Some("Basic dXNlcjpwdw=="));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn resolves_user_from_store() {
        let state = test_state();
        let user = seed_user(&state, "alice", Role::Author).await;
        let token = issue_token(&user.id, user.role, &state.auth).unwrap();
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));

        let Auth(resolved) = Auth::from_request_parts(&mut parts, &state)
            .await
            .expect("extraction succeeds");
        assert_eq!(resolved, user);
    }

    #[tokio::test]
    async fn role_change_after_issuance_is_visible() {
        let state = test_state();
        let user = seed_user(&state, "alice", Role::Reader).await;
        let token = issue_token(&user.id, user.role, &state.auth).unwrap();

        state
            .store
            .write()
            .await
            .update_user_role(&user.id, Role::Author)
            .expect("role update succeeds");

        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));
        let Auth(resolved) = Auth::from_request_parts(&mut parts, &state)
            .await
            .expect("extraction succeeds");

        // The token still claims Reader; the store record wins.
        assert_eq!(resolved.role, Role::Author);
    }

    #[tokio::test]
    async fn unknown_subject_is_user_not_found() {
        let state = test_state();
        let token = issue_token("ghost", Role::Reader, &state.auth).unwrap();
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn expired_token_is_invalid_token() {
        let state = test_state();
        let user = seed_user(&state, "alice", Role::Author).await;
        let issued_at = Utc::now().timestamp() - 2 * TOKEN_TTL_SECS;
        let token = issue_token_at(&user.id, user.role, issued_at, &state.auth).unwrap();
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn optional_auth_returns_none_without_credentials() {
        let state = test_state();
        let mut parts = parts_with_header(None);

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &state)
            .await
            .expect("optional auth never rejects");
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn optional_auth_resolves_valid_credentials() {
        let state = test_state();
        let user = seed_user(&state, "alice", Role::Author).await;
        let token = issue_token(&user.id, user.role, &state.auth).unwrap();
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));

        let OptionalAuth(resolved) = OptionalAuth::from_request_parts(&mut parts, &state)
            .await
            .expect("optional auth never rejects");
        assert_eq!(resolved, Some(user));
    }
}
