//! Visitor extractor.
//!
//! Resolves the visitor id stored in the cookie session (minting one on the
//! first request) and hands the route the visitor's [`ShopSession`] handle.
//!
//! [`ShopSession`]: greenleaf_core::ShopSession

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use tracing::Span;
use uuid::Uuid;

use crate::error::AppError;
use crate::sessions::SessionHandle;
use crate::state::AppState;

/// Session key holding the visitor id.
pub const VISITOR_ID_KEY: &str = "visitor_id";

/// The current visitor and their storefront session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(visitor: Visitor) -> impl IntoResponse {
///     let session = visitor.session.lock().await;
///     format!("{} items", session.cart_snapshot().item_count)
/// }
/// ```
pub struct Visitor {
    pub id: Uuid,
    pub session: SessionHandle,
}

impl FromRequestParts<AppState> for Visitor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let id = if let Some(id) = session.get::<Uuid>(VISITOR_ID_KEY).await? {
            id
        } else {
            let id = Uuid::new_v4();
            session.insert(VISITOR_ID_KEY, id).await?;
            tracing::debug!(visitor_id = %id, "New visitor");
            id
        };

        Span::current().record("visitor_id", tracing::field::display(id));

        let handle = state.sessions().get_or_create(id).await;
        Ok(Self {
            id,
            session: handle,
        })
    }
}
