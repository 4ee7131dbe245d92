// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory content store for users, posts, and comments.
//!
//! The store is constructed once at startup and handed to [`crate::state::AppState`];
//! handlers never reach for a global. Operations are atomic at the
//! single-record level only - "check existence then delete" is two calls
//! with a race window, and the loser of that race sees
//! [`StoreError::NotFound`], which handlers surface as an ordinary 404.
//!
//! Uniqueness violations are reported as [`StoreError::DuplicateKey`],
//! keeping the error surface independent of any particular backing store's
//! error encoding.

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Role;
use crate::models::{Comment, Post, User};

/// Store-level failure, independent of the backing implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique field already holds this value.
    #[error("{0} already exists")]
    DuplicateKey(&'static str),
    /// The named record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
}

/// Input for [`InMemoryStore::create_user`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Input for [`InMemoryStore::create_post`].
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author_id: String,
}

/// Input for [`InMemoryStore::create_comment`].
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub post_id: String,
    pub author_id: String,
}

#[derive(Default)]
pub struct InMemoryStore {
    users: HashMap<String, User>,
    posts: HashMap<String, Post>,
    comments: HashMap<String, Comment>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user, enforcing username and email uniqueness.
    pub fn create_user(&mut self, new: NewUser) -> Result<User, StoreError> {
        if self.users.values().any(|user| user.username == new.username) {
            return Err(StoreError::DuplicateKey("username"));
        }
        if self.users.values().any(|user| user.email == new.email) {
            return Err(StoreError::DuplicateKey("email"));
        }

        let id = Uuid::new_v4().to_string();
        let user = User {
            id: id.clone(),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    pub fn user_by_id(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).cloned()
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.users.values().find(|user| user.email == email).cloned()
    }

    /// Change a user's role in place (operator-side action; sessions pick
    /// the new role up on their next request).
    pub fn update_user_role(&mut self, user_id: &str, role: Role) -> Result<(), StoreError> {
        let Some(user) = self.users.get_mut(user_id) else {
            return Err(StoreError::NotFound("user"));
        };
        user.role = role;
        Ok(())
    }

    pub fn create_post(&mut self, new: NewPost) -> Post {
        let id = Uuid::new_v4().to_string();
        let post = Post {
            id: id.clone(),
            title: new.title,
            content: new.content,
            published: new.published,
            author_id: new.author_id,
            created_at: Utc::now(),
        };
        self.posts.insert(id, post.clone());
        post
    }

    pub fn post_by_id(&self, post_id: &str) -> Option<Post> {
        self.posts.get(post_id).cloned()
    }

    /// Published posts, newest first.
    pub fn published_posts(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|post| post.published)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    /// Apply a partial update; omitted fields keep their stored value.
    pub fn update_post(
        &mut self,
        post_id: &str,
        title: Option<String>,
        content: Option<String>,
        published: Option<bool>,
    ) -> Result<Post, StoreError> {
        let Some(post) = self.posts.get_mut(post_id) else {
            return Err(StoreError::NotFound("post"));
        };

        if let Some(title) = title {
            post.title = title;
        }
        if let Some(content) = content {
            post.content = content;
        }
        if let Some(published) = published {
            post.published = published;
        }

        Ok(post.clone())
    }

    /// Delete a post and its comment thread.
    pub fn delete_post(&mut self, post_id: &str) -> Result<(), StoreError> {
        if self.posts.remove(post_id).is_none() {
            return Err(StoreError::NotFound("post"));
        }
        self.comments.retain(|_, comment| comment.post_id != post_id);
        Ok(())
    }

    pub fn create_comment(&mut self, new: NewComment) -> Comment {
        let id = Uuid::new_v4().to_string();
        let comment = Comment {
            id: id.clone(),
            content: new.content,
            post_id: new.post_id,
            author_id: new.author_id,
            created_at: Utc::now(),
        };
        self.comments.insert(id, comment.clone());
        comment
    }

    pub fn comment_by_id(&self, comment_id: &str) -> Option<Comment> {
        self.comments.get(comment_id).cloned()
    }

    /// Comments on a post, oldest first.
    pub fn comments_for_post(&self, post_id: &str) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        comments
    }

    pub fn delete_comment(&mut self, comment_id: &str) -> Result<(), StoreError> {
        if self.comments.remove(comment_id).is_some() {
            Ok(())
        } else {
            Err(StoreError::NotFound("comment"))
        }
    }
}
