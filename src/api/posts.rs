// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Post endpoints.
//!
//! Mutations re-check existence and ownership against the store in a fixed
//! order: identity (401, via the extractor), then existence (404), then
//! policy (403). A missing post is reported as 404 no matter who asks.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{policy, Auth, OptionalAuth},
    error::ApiError,
    models::{
        AuthorSummary, CommentWithAuthor, CreatePostRequest, PostDetail, PostSaved,
        PostWithAuthor, UpdatePostRequest,
    },
    state::AppState,
    store::{InMemoryStore, NewPost},
};

/// Resolve a post's or comment's author attribution.
///
/// Users are never deleted, so a dangling author id means the store is
/// corrupt; log it and return a generic 500.
pub(crate) fn author_for(store: &InMemoryStore, author_id: &str) -> Result<AuthorSummary, ApiError> {
    store
        .user_by_id(author_id)
        .as_ref()
        .map(AuthorSummary::from)
        .ok_or_else(|| {
            tracing::error!(author_id, "record references missing author");
            ApiError::internal()
        })
}

/// List published posts, newest first.
#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    responses((status = 200, description = "Published posts", body = [PostWithAuthor]))
)]
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostWithAuthor>>, ApiError> {
    let store = state.store.read().await;

    let mut posts = Vec::new();
    for post in store.published_posts() {
        let author = author_for(&store, &post.author_id)?;
        posts.push(PostWithAuthor::new(post, author));
    }

    Ok(Json(posts))
}

/// Fetch a single post with its comment thread.
///
/// Drafts answer 404 unless the caller is an AUTHOR, so outsiders cannot
/// tell a hidden draft from a missing post.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The post with its comments", body = PostDetail),
        (status = 404, description = "Absent, or unpublished and caller is not an AUTHOR"),
    )
)]
pub async fn get_post(
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PostDetail>, ApiError> {
    let store = state.store.read().await;

    let Some(post) = store.post_by_id(&id) else {
        return Err(ApiError::not_found("Post not found or not published."));
    };
    if !policy::can_view_post(viewer.as_ref(), &post) {
        return Err(ApiError::not_found("Post not found or not published."));
    }

    let author = author_for(&store, &post.author_id)?;
    let comments = store
        .comments_for_post(&post.id)
        .into_iter()
        .map(|comment| {
            let author = author_for(&store, &comment.author_id)?;
            Ok(CommentWithAuthor::new(comment, author))
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(Json(PostDetail::new(post, author, comments)))
}

/// Create a post. AUTHOR role required; defaults to an unpublished draft.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostRequest,
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Post created", body = PostSaved),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an AUTHOR"),
    )
)]
pub async fn create_post(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostSaved>), ApiError> {
    if !policy::can_create_post(&user) {
        return Err(ApiError::forbidden(
            "Forbidden: Only authors can create posts.",
        ));
    }

    let (Some(title), Some(content)) = (request.title, request.content) else {
        return Err(ApiError::bad_request("Title and content are required."));
    };

    let post = state.store.write().await.create_post(NewPost {
        title,
        content,
        published: request.published.unwrap_or(false),
        author_id: user.id,
    });

    Ok((
        StatusCode::CREATED,
        Json(PostSaved {
            message: "Post created successfully".to_string(),
            post,
        }),
    ))
}

/// Update a post. Only its owning AUTHOR may; omitted fields are kept.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Post updated", body = PostSaved),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the post"),
        (status = 404, description = "No such post"),
    )
)]
pub async fn update_post(
    Auth(user): Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<PostSaved>, ApiError> {
    let mut store = state.store.write().await;

    let Some(existing) = store.post_by_id(&id) else {
        return Err(ApiError::not_found("Post not found."));
    };
    if !policy::can_modify_post(&user, &existing) {
        return Err(ApiError::forbidden(
            "Forbidden: You can only update your own posts.",
        ));
    }

    let post = store
        .update_post(&id, request.title, request.content, request.published)
        .map_err(|_| ApiError::not_found("Post not found."))?;

    Ok(Json(PostSaved {
        message: "Post updated successfully".to_string(),
        post,
    }))
}

/// Delete a post and its comments. Only its owning AUTHOR may.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the post"),
        (status = 404, description = "No such post"),
    )
)]
pub async fn delete_post(
    Auth(user): Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;

    let Some(existing) = store.post_by_id(&id) else {
        return Err(ApiError::not_found("Post not found."));
    };
    if !policy::can_modify_post(&user, &existing) {
        return Err(ApiError::forbidden(
            "Forbidden: You can only delete your own posts.",
        ));
    }

    store
        .delete_post(&id)
        .map_err(|_| ApiError::not_found("Post not found."))?;

    Ok(StatusCode::NO_CONTENT)
}
