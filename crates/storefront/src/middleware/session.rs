//! Session middleware configuration.
//!
//! The cookie session only carries the visitor id; cart and grid state live
//! in the [`SessionRegistry`](crate::sessions::SessionRegistry). Both are
//! memory-only.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "greenleaf_session";

/// Create the session layer with an in-memory store.
///
/// Cookies expire after the same idle period as visitor sessions, and are
/// marked secure when the storefront is served over HTTPS.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    let idle_secs = i64::try_from(config.sessions.idle_timeout.as_secs()).unwrap_or(i64::MAX);

    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(idle_secs),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
