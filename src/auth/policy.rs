// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization policy.
//!
//! Pure decision functions over an identity and a resource. Handlers own
//! the evaluation order: identity first (401), then resource existence
//! (404), then these checks (403) - so a caller is told a post exists
//! before being told they may not touch it, and never the other way
//! around.
//!
//! | Action | Requires identity | Condition |
//! |---|---|---|
//! | Create post | yes | role is AUTHOR |
//! | Update/delete post | yes | role is AUTHOR and caller owns the post |
//! | Read post | no | published, or caller has role AUTHOR |
//! | Create comment | yes | target post exists (checked by handler) |
//! | Delete comment | yes | caller owns the comment or has role AUTHOR |
//! | Read comments | no | - |

use super::Role;
use crate::models::{Comment, Post, User};

/// Only authors publish.
pub fn can_create_post(user: &User) -> bool {
    user.role == Role::Author
}

/// Authors may update or delete their own posts; nobody else's.
pub fn can_modify_post(user: &User, post: &Post) -> bool {
    user.role == Role::Author && post.author_id == user.id
}

/// Published posts are public; drafts are visible to any AUTHOR.
pub fn can_view_post(viewer: Option<&User>, post: &Post) -> bool {
    post.published || viewer.is_some_and(|user| user.role == Role::Author)
}

/// A comment is deletable by its author, or moderated away by any AUTHOR.
pub fn can_delete_comment(user: &User, comment: &Comment) -> bool {
    comment.author_id == user.id || user.role == Role::Author
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            username: format!("user-{id}"),
            email: format!("{id}@x.com"),
            password_hash: "digest".to_string(),
            role,
        }
    }

    fn make_post(author_id: &str, published: bool) -> Post {
        Post {
            id: "post_1".to_string(),
            title: "T".to_string(),
            content: "C".to_string(),
            published,
            author_id: author_id.to_string(),
            created_at: Utc::now(),
        }
    }

    fn make_comment(author_id: &str) -> Comment {
        Comment {
            id: "comment_1".to_string(),
            content: "hi".to_string(),
            post_id: "post_1".to_string(),
            author_id: author_id.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn only_authors_create_posts() {
        assert!(can_create_post(&make_user("a", Role::Author)));
        assert!(!can_create_post(&make_user("r", Role::Reader)));
    }

    #[test]
    fn modification_requires_author_role_and_ownership() {
        let post = make_post("owner", false);

        assert!(can_modify_post(&make_user("owner", Role::Author), &post));
        // Another author does not own it.
        assert!(!can_modify_post(&make_user("other", Role::Author), &post));
        // The owner id with a reader role cannot modify either.
        assert!(!can_modify_post(&make_user("owner", Role::Reader), &post));
    }

    #[test]
    fn published_posts_are_visible_to_everyone() {
        let post = make_post("owner", true);

        assert!(can_view_post(None, &post));
        assert!(can_view_post(Some(&make_user("r", Role::Reader)), &post));
    }

    #[test]
    fn drafts_are_visible_to_authors_only() {
        let post = make_post("owner", false);

        assert!(!can_view_post(None, &post));
        assert!(!can_view_post(Some(&make_user("r", Role::Reader)), &post));
        // Any author sees drafts, owner or not.
        assert!(can_view_post(Some(&make_user("other", Role::Author)), &post));
    }

    #[test]
    fn comment_deletion_allows_owner_or_any_author() {
        let comment = make_comment("writer");

        assert!(can_delete_comment(&make_user("writer", Role::Reader), &comment));
        assert!(can_delete_comment(&make_user("moderator", Role::Author), &comment));
        assert!(!can_delete_comment(&make_user("stranger", Role::Reader), &comment));
    }
}
