// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the domain records held by the content store and the
//! request/response data structures used by the REST API. Wire types derive
//! `Serialize`/`Deserialize` and `ToSchema` for automatic JSON handling and
//! OpenAPI documentation.
//!
//! ## Password Handling
//!
//! [`User`] deliberately does not derive `Serialize`: the stored password
//! hash can never be rendered into a response body. Handlers return the
//! [`PublicUser`] projection instead.
//!
//! ## Model Categories
//!
//! - **Users**: accounts with a READER or AUTHOR role
//! - **Posts**: articles owned by one author, draft or published
//! - **Comments**: attached to exactly one post

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

// =============================================================================
// User Models
// =============================================================================

/// A registered user account as held by the content store.
///
/// Not serializable; see [`PublicUser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier for this user.
    pub id: String,
    /// Unique display name.
    pub username: String,
    /// Unique email address (login credential).
    pub email: String,
    /// Salted bcrypt digest of the password.
    pub password_hash: String,
    /// Role chosen at registration.
    pub role: Role,
}

/// Client-facing projection of a [`User`], without the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Author attribution embedded in post and comment responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthorSummary {
    pub username: String,
    pub email: String,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Request to register a new user.
///
/// Fields are optional at the serde layer so missing input surfaces as a
/// 400 with a message, not a deserialization rejection.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// `READER` or `AUTHOR`; defaults to `READER` when omitted.
    pub role: Option<String>,
}

/// Response for a successful registration.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Request to log in with email and password.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response for a successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    /// Signed session token, valid for one hour.
    pub token: String,
}

// =============================================================================
// Post Models
// =============================================================================

/// A blog post as held by the content store.
///
/// Unpublished posts are only visible to users with the AUTHOR role.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier for this post.
    pub id: String,
    pub title: String,
    pub content: String,
    /// Whether the post is publicly visible.
    pub published: bool,
    /// The user who owns this post.
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

/// Request to create a new post.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Defaults to `false` (draft) when omitted.
    pub published: Option<bool>,
}

/// Request to update an existing post. Omitted fields are left unchanged.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

/// Response for a post create or update.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostSaved {
    pub message: String,
    pub post: Post,
}

/// A post with its author attribution, as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostWithAuthor {
    pub id: String,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorSummary,
}

impl PostWithAuthor {
    pub fn new(post: Post, author: AuthorSummary) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            published: post.published,
            author_id: post.author_id,
            created_at: post.created_at,
            author,
        }
    }
}

/// A post with author attribution and its comment thread, as returned by
/// the single-post endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub id: String,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorSummary,
    /// Comments in creation order, oldest first.
    pub comments: Vec<CommentWithAuthor>,
}

impl PostDetail {
    pub fn new(post: Post, author: AuthorSummary, comments: Vec<CommentWithAuthor>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            published: post.published,
            author_id: post.author_id,
            created_at: post.created_at,
            author,
            comments,
        }
    }
}

// =============================================================================
// Comment Models
// =============================================================================

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier for this comment.
    pub id: String,
    pub content: String,
    /// The post this comment belongs to.
    pub post_id: String,
    /// The user who wrote this comment.
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

/// Request to create a comment on a post.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
}

/// Response for a comment create.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentSaved {
    pub message: String,
    pub comment: Comment,
}

/// A comment with its author attribution.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    pub id: String,
    pub content: String,
    pub post_id: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorSummary,
}

impl CommentWithAuthor {
    pub fn new(comment: Comment, author: AuthorSummary) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            post_id: comment.post_id,
            author_id: comment.author_id,
            created_at: comment.created_at,
            author,
        }
    }
}
