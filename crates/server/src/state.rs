//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::JsonStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The record store inside it owns
/// the per-collection locks, so every handler must go through the same
/// instance.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: JsonStore,
}

impl AppState {
    /// Create a new application state with a store rooted at `config.data_dir`.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let store = JsonStore::new(config.data_dir.clone());

        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the record store.
    #[must_use]
    pub fn store(&self) -> &JsonStore {
        &self.inner.store
    }
}
