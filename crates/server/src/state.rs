//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ServerConfig;
use crate::services::auth::TokenSigner;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the two database pools and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    shop_pool: SqlitePool,
    events_pool: SqlitePool,
    token_signer: TokenSigner,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `shop_pool` - Pool for the shop database
    /// * `events_pool` - Pool for the events database
    #[must_use]
    pub fn new(config: ServerConfig, shop_pool: SqlitePool, events_pool: SqlitePool) -> Self {
        let token_signer = TokenSigner::new(config.token_secret.clone(), config.token_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                shop_pool,
                events_pool,
                token_signer,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the shop database pool.
    #[must_use]
    pub fn shop_pool(&self) -> &SqlitePool {
        &self.inner.shop_pool
    }

    /// Get a reference to the events database pool.
    #[must_use]
    pub fn events_pool(&self) -> &SqlitePool {
        &self.inner.events_pool
    }

    /// Get a reference to the login token signer.
    #[must_use]
    pub fn token_signer(&self) -> &TokenSigner {
        &self.inner.token_signer
    }
}
