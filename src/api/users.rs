// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::{password, token, Role},
    error::ApiError,
    models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    state::AppState,
    store::{NewUser, StoreError},
};

/// Register a new user.
///
/// The role defaults to `READER`; the password is stored as a salted
/// bcrypt digest and never returned.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    tag = "Users",
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 409, description = "Username or email already taken"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let (Some(username), Some(email), Some(password)) =
        (request.username, request.email, request.password)
    else {
        return Err(ApiError::bad_request("All fields are required."));
    };

    let role = match request.role.as_deref() {
        Some(value) => Role::from_str(value)
            .ok_or_else(|| ApiError::bad_request("Role must be READER or AUTHOR."))?,
        None => Role::default(),
    };

    let password_hash = password::hash_password(&password).map_err(|err| {
        tracing::error!(error = %err, "password hashing failed");
        ApiError::internal()
    })?;

    let mut store = state.store.write().await;
    let user = store
        .create_user(NewUser {
            username,
            email,
            password_hash,
            role,
        })
        .map_err(|err| match err {
            StoreError::DuplicateKey(_) => {
                ApiError::conflict("Username or email already exists.")
            }
            other => {
                tracing::error!(error = %other, "user creation failed");
                ApiError::internal()
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: user.into(),
        }),
    ))
}

/// Log in with email and password.
///
/// Unknown emails and wrong passwords produce the same 401 so the response
/// does not reveal which credential was wrong.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(ApiError::bad_request("Email and password are required."));
    };

    let user = {
        let store = state.store.read().await;
        store.user_by_email(&email)
    };

    let Some(user) = user else {
        return Err(ApiError::unauthorized("Invalid credentials."));
    };

    if !password::verify_password(&password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials."));
    }

    let token = token::issue_token(&user.id, user.role, &state.auth).map_err(|err| {
        tracing::error!(error = %err, "token issuance failed");
        ApiError::internal()
    })?;

    Ok(Json(LoginResponse {
        message: "Logged in successfully".to_string(),
        token,
    }))
}
