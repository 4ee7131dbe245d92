// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::AuthKeys;
use crate::store::InMemoryStore;

/// Shared application state, cloned into every handler.
///
/// The store handle and signing keys are constructed once at startup and
/// injected here; there is no module-level singleton to reach for, and
/// tests build their own state with a fresh store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub auth: Arc<AuthKeys>,
}

impl AppState {
    pub fn new(store: InMemoryStore, auth: AuthKeys) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth: Arc::new(auth),
        }
    }
}
