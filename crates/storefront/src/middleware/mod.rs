//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with `request_id` and `visitor_id` fields)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with in-memory store)
//!
//! The [`Visitor`] extractor runs inside all of them.

pub mod request_id;
pub mod session;
pub mod visitor;

pub use request_id::request_id_middleware;
pub use session::create_session_layer;
pub use visitor::Visitor;
