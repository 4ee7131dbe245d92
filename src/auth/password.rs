// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing.
//!
//! One-way salted bcrypt digests. Hashing is deliberately expensive; a
//! failed verification is an ordinary `false`, never an error, so login
//! handlers can treat mismatch and undecodable digests uniformly.

use bcrypt::BcryptError;

/// bcrypt work factor (2^10 rounds).
pub const HASH_COST: u32 = 10;

/// Hash a plaintext password with a fresh salt.
///
/// # Errors
/// Fails only on RNG or parameter errors, which indicate a broken runtime
/// rather than bad input; callers surface this as a 500.
pub fn hash_password(plain: &str) -> Result<String, BcryptError> {
    bcrypt::hash(plain, HASH_COST)
}

/// Check a plaintext password against a stored digest.
///
/// Returns `false` for mismatches and for digests that cannot be decoded.
pub fn verify_password(plain: &str, digest: &str) -> bool {
    bcrypt::verify(plain, digest).unwrap_or(false)
}
