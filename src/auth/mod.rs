// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Session tokens and authorization for the blog API.
//!
//! ## Auth Flow
//!
//! 1. Client registers (`POST /register`); the password is stored as a
//!    salted bcrypt digest.
//! 2. Client logs in (`POST /login`) and receives an HS256 JWT asserting
//!    `(user id, role)`, valid for one hour.
//! 3. Client sends `Authorization: Bearer <token>`; the `Auth` extractor:
//!    - verifies signature and expiry against the process-wide secret
//!    - re-resolves the subject against the content store
//!    - attaches the current user record to the handler
//! 4. Handlers consult `policy` for role/ownership decisions.
//!
//! ## Security
//!
//! - Sessions are stateless; there is no revocation list
//! - The stored user record, not the token claims, drives authorization
//! - Clock skew tolerance is 60 seconds

pub mod error;
pub mod extractor;
pub mod password;
pub mod policy;
pub mod roles;
pub mod token;

pub use error::AuthError;
pub use extractor::{Auth, OptionalAuth};
pub use roles::Role;
pub use token::AuthKeys;
