// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Role,
    models::{
        AuthorSummary, Comment, CommentSaved, CommentWithAuthor, CreateCommentRequest,
        CreatePostRequest, LoginRequest, LoginResponse, Post, PostDetail, PostSaved,
        PostWithAuthor, PublicUser, RegisterRequest, RegisterResponse, UpdatePostRequest,
    },
    state::AppState,
};

pub mod comments;
pub mod health;
pub mod posts;
pub mod users;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/posts/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/comments/{id}", delete(comments::delete_comment))
        .route("/health", get(health::health))
        .route("/", get(health::welcome))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::register,
        users::login,
        posts::list_posts,
        posts::get_post,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        comments::create_comment,
        comments::list_comments,
        comments::delete_comment,
        health::health
    ),
    components(
        schemas(
            Role,
            PublicUser,
            AuthorSummary,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            Post,
            CreatePostRequest,
            UpdatePostRequest,
            PostSaved,
            PostWithAuthor,
            PostDetail,
            Comment,
            CreateCommentRequest,
            CommentSaved,
            CommentWithAuthor,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration and login"),
        (name = "Posts", description = "Post publishing and management"),
        (name = "Comments", description = "Comment threads"),
        (name = "Health", description = "Service probes")
    )
)]
struct ApiDoc;

/// Registers the bearer scheme referenced by the protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthKeys;
    use crate::store::InMemoryStore;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let state = AppState::new(
            InMemoryStore::new(),
            AuthKeys::from_secret(b"test-signing-secret"),
        );
        let app = router(state);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[test]
    fn openapi_document_includes_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components are registered");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
