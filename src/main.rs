// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr};

use relational_blog_server::{
    api::router,
    auth::AuthKeys,
    config::{HOST_ENV, JWT_SECRET_ENV, LOG_FORMAT_ENV, PORT_ENV},
    state::AppState,
    store::InMemoryStore,
};

#[tokio::main]
async fn main() {
    init_tracing();

    // The signing secret is a hard deployment requirement for every
    // token-issuing and token-verifying path; refuse to start without it
    // rather than failing on the first login.
    let secret = env::var(JWT_SECRET_ENV)
        .unwrap_or_else(|_| panic!("{JWT_SECRET_ENV} must be set"));

    let state = AppState::new(InMemoryStore::new(), AuthKeys::from_secret(secret.as_bytes()));
    let app = router(state);

    let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var(PORT_ENV)
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Blog server listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("HTTP server failed");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));

    if matches!(env::var(LOG_FORMAT_ENV).as_deref(), Ok("json")) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
