//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::services::SettlementFeed;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    feed: SettlementFeed,
}

impl AppState {
    /// Build the shared state.
    #[must_use]
    pub fn new(pool: PgPool, feed: SettlementFeed) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool, feed }),
        }
    }

    /// Database pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Settlement feed handle.
    #[must_use]
    pub fn feed(&self) -> &SettlementFeed {
        &self.inner.feed
    }
}
