//! Shared application state for all routes. Immutable after startup.

use crate::auth::TokenSigner;
use crate::config::AppConfig;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenSigner>,
    /// Present only when a database is configured.
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(config: AppConfig, pool: Option<PgPool>) -> Self {
        let tokens = Arc::new(TokenSigner::new(config.jwt_secret.as_bytes(), config.token_ttl_secs));
        AppState {
            config: Arc::new(config),
            tokens,
            pool,
        }
    }
}
