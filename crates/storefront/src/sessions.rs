//! In-memory registry of visitor storefront sessions.
//!
//! Each visitor (identified by a UUID kept in their session cookie) gets one
//! [`ShopSession`] behind a `tokio` mutex. Entries expire after a period of
//! inactivity; nothing is persisted, so a restart or an expiry starts the
//! visitor over with an empty cart.

use std::sync::Arc;

use greenleaf_core::ShopSession;
use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::SessionConfig;

/// Shared handle to one visitor's session.
pub type SessionHandle = Arc<Mutex<ShopSession>>;

/// Visitor sessions keyed by visitor id.
#[derive(Clone)]
pub struct SessionRegistry {
    cache: Cache<Uuid, SessionHandle>,
    config: SessionConfig,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_sessions)
            .time_to_idle(config.idle_timeout)
            .build();

        Self {
            cache,
            config: config.clone(),
        }
    }

    /// Get the visitor's session, creating an empty one on first use.
    pub async fn get_or_create(&self, visitor: Uuid) -> SessionHandle {
        let batch_size = self.config.batch_size;
        self.cache
            .get_with(visitor, async move {
                tracing::debug!(%visitor, "Creating visitor session");
                Arc::new(Mutex::new(ShopSession::new(batch_size)))
            })
            .await
    }
}
