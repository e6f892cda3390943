//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::services::KakaoClient;
use crate::services::auth::TokenProvider;
use crate::services::kakao::KakaoError;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the database pool, configuration, the
/// token provider, and the Kakao client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    tokens: TokenProvider,
    kakao: KakaoClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Kakao HTTP client fails to build.
    pub fn new(config: ApiConfig, pool: PgPool) -> Result<Self, KakaoError> {
        let tokens = TokenProvider::new(&config.token_secret, config.token_ttl_minutes);
        let kakao = KakaoClient::new(&config.kakao)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
                kakao,
            }),
        })
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the token provider.
    #[must_use]
    pub fn tokens(&self) -> &TokenProvider {
        &self.inner.tokens
    }

    /// Get a reference to the Kakao OAuth client.
    #[must_use]
    pub fn kakao(&self) -> &KakaoClient {
        &self.inner.kakao
    }
}
