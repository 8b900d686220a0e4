//! Router assembly.

use axum::{Router, body::Body, http::Request, routing::get};
use tower_http::trace::TraceLayer;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::routes;
use crate::state::AppState;

/// Build the storefront router with its full middleware stack.
pub fn build_router(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
            visitor_id = tracing::field::Empty,
        )
    });

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog service.
async fn health() -> &'static str {
    "ok"
}
