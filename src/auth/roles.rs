// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Semantics
///
/// - `Author` - may create posts, edit/delete own posts, see unpublished
///   posts, and moderate (delete) any comment
/// - `Reader` - may read published posts and write comments
///
/// Wire form is UPPERCASE (`"AUTHOR"`, `"READER"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Publishes and moderates content
    Author,
    /// Reads and comments
    Reader,
}

impl Role {
    /// Parse role from string (case-insensitive).
    /// Used for the optional `role` field at registration.
    pub fn from_str(s: &str) -> Option<Role> {
        match s.to_uppercase().as_str() {
            "AUTHOR" => Some(Role::Author),
            "READER" => Some(Role::Reader),
            _ => None,
        }
    }
}

impl Default for Role {
    /// Default role is Reader (least privilege for new registrations).
    fn default() -> Self {
        Role::Reader
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Author => write!(f, "AUTHOR"),
            Role::Reader => write!(f, "READER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_parses_correctly() {
        assert_eq!(Role::from_str("AUTHOR"), Some(Role::Author));
        assert_eq!(Role::from_str("author"), Some(Role::Author));
        assert_eq!(Role::from_str("Reader"), Some(Role::Reader));
        assert_eq!(Role::from_str("admin"), None);
    }

    #[test]
    fn default_role_is_reader() {
        assert_eq!(Role::default(), Role::Reader);
    }

    #[test]
    fn wire_form_is_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Author).unwrap(), r#""AUTHOR""#);
        let parsed: Role = serde_json::from_str(r#""READER""#).unwrap();
        assert_eq!(parsed, Role::Reader);
    }
}
