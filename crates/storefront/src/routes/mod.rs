//! HTTP route handlers for storefront.
//!
//! These handlers are the thin adapter between browser events (HTMX requests)
//! and the per-visitor [`ShopSession`](greenleaf_core::ShopSession).
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Storefront page (categories, first batch, cart)
//! GET  /health                  - Health check
//!
//! # Catalog (HTMX fragments)
//! GET  /categories/{selection}  - First batch for "all" or a category id
//! GET  /products/more           - Next batch (replaces the "load more" button)
//! GET  /products/{id}           - Product detail modal
//!
//! # Cart (HTMX fragments)
//! GET  /cart                    - Cart summary
//! POST /cart/add                - Add product (form: product_id)
//! POST /cart/remove             - Remove product (form: product_id)
//! ```

pub mod cart;
pub mod home;
pub mod products;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};
use greenleaf_core::{Batch, CategorySelection, Product, ProductId};

use crate::catalog::CatalogError;
use crate::error::AppError;
use crate::middleware::Visitor;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/more", get(products::load_more))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/categories/{selection}", get(products::select_category))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
}

/// Result of running a category query for a visitor.
pub enum QueryOutcome {
    /// Results were installed; this is the first batch.
    Applied(Batch),
    /// A newer query was issued while this one was in flight.
    Superseded,
}

/// Fetch the products for `selection` and install them in the visitor's session.
///
/// The session lock is released while the catalog call is in flight, so a
/// later selection by the same visitor can overtake this one; the slower
/// response is then discarded.
///
/// # Errors
///
/// Returns the catalog error unchanged; the session is left as it was.
pub async fn run_category_query(
    state: &AppState,
    visitor: &Visitor,
    selection: CategorySelection,
) -> Result<QueryOutcome, CatalogError> {
    let ticket = visitor.session.lock().await.on_category_selected(selection);
    let products = state.catalog().list_products(selection).await?;

    let applied = visitor.session.lock().await.apply_results(ticket, products);
    Ok(applied.map_or_else(
        || {
            tracing::debug!(seq = ticket.seq(), %selection, "Discarding superseded catalog response");
            QueryOutcome::Superseded
        },
        QueryOutcome::Applied,
    ))
}

/// Find a product the visitor can see, asking the catalog if it is not in
/// their current result set.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] if the catalog does not know the id, or the
/// catalog error if the lookup fails.
pub async fn resolve_product(
    state: &AppState,
    visitor: &Visitor,
    id: ProductId,
) -> Result<Product, AppError> {
    let known = visitor.session.lock().await.find_product(id).cloned();
    if let Some(product) = known {
        return Ok(product);
    }

    match state.catalog().get_product(id).await {
        Ok(product) => Ok(product),
        Err(CatalogError::Service { status: 404, .. }) => {
            Err(AppError::NotFound(format!("plant {id}")))
        }
        Err(e) => Err(e.into()),
    }
}

/// Report a catalog failure that the page can render around.
pub fn report_catalog_error(action: &str, err: &CatalogError) {
    let event_id = sentry::capture_error(err);
    tracing::error!(
        error = %err,
        sentry_event_id = %event_id,
        action,
        "Catalog query failed"
    );
}
