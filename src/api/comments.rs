// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Comment endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::posts::author_for;
use crate::{
    auth::{policy, Auth},
    error::ApiError,
    models::{CommentSaved, CommentWithAuthor, CreateCommentRequest},
    state::AppState,
    store::NewComment,
};

/// Comment on a post. Any authenticated user may; the post must exist.
#[utoipa::path(
    post,
    path = "/posts/{id}/comments",
    params(("id" = String, Path, description = "Post id")),
    request_body = CreateCommentRequest,
    tag = "Comments",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Comment created", body = CommentSaved),
        (status = 400, description = "Missing content"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such post"),
    )
)]
pub async fn create_comment(
    Auth(user): Auth,
    Path(post_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentSaved>), ApiError> {
    let Some(content) = request.content else {
        return Err(ApiError::bad_request("Comment content is required."));
    };

    let mut store = state.store.write().await;
    if store.post_by_id(&post_id).is_none() {
        return Err(ApiError::not_found("Post not found."));
    }

    let comment = store.create_comment(NewComment {
        content,
        post_id,
        author_id: user.id,
    });

    Ok((
        StatusCode::CREATED,
        Json(CommentSaved {
            message: "Comment created successfully".to_string(),
            comment,
        }),
    ))
}

/// List a post's comments, oldest first.
///
/// A post id with no comments (including an id that matches no post)
/// yields an empty list, not a 404.
#[utoipa::path(
    get,
    path = "/posts/{id}/comments",
    params(("id" = String, Path, description = "Post id")),
    tag = "Comments",
    responses((status = 200, description = "Comments on the post", body = [CommentWithAuthor]))
)]
pub async fn list_comments(
    Path(post_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentWithAuthor>>, ApiError> {
    let store = state.store.read().await;

    let comments = store
        .comments_for_post(&post_id)
        .into_iter()
        .map(|comment| {
            let author = author_for(&store, &comment.author_id)?;
            Ok(CommentWithAuthor::new(comment, author))
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(Json(comments))
}

/// Delete a comment. Allowed for its author, or any AUTHOR (moderation).
#[utoipa::path(
    delete,
    path = "/comments/{id}",
    params(("id" = String, Path, description = "Comment id")),
    tag = "Comments",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is neither the comment's author nor an AUTHOR"),
        (status = 404, description = "No such comment"),
    )
)]
pub async fn delete_comment(
    Auth(user): Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;

    let Some(comment) = store.comment_by_id(&id) else {
        return Err(ApiError::not_found("Comment not found."));
    };
    if !policy::can_delete_comment(&user, &comment) {
        return Err(ApiError::forbidden(
            "Forbidden: You can only delete your own comments or you need to be an author.",
        ));
    }

    store
        .delete_comment(&id)
        .map_err(|_| ApiError::not_found("Comment not found."))?;

    Ok(StatusCode::NO_CONTENT)
}
