//! Cart route handlers.
//!
//! Cart operations are HTMX fragments: each returns the re-rendered cart
//! summary and fires a `cart-updated` event for anything else listening.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use greenleaf_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use super::resolve_product;
use super::views::CartView;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::Visitor;
use crate::state::AppState;

/// HTMX event fired after every cart mutation.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Add or remove form data.
#[derive(Debug, Deserialize)]
pub struct CartProductForm {
    pub product_id: ProductId,
}

/// Cart summary fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart.html")]
pub struct CartTemplate {
    pub cart: CartView,
}

fn updated(cart: CartView) -> Response {
    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartTemplate { cart },
    )
        .into_response()
}

/// Display the cart summary.
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn show(visitor: Visitor) -> CartTemplate {
    let snapshot = visitor.session.lock().await.cart_snapshot();
    CartTemplate {
        cart: CartView::from(&snapshot),
    }
}

/// Add one unit of a product to the cart (HTMX).
#[instrument(skip(state, visitor), fields(visitor_id = %visitor.id))]
pub async fn add(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<CartProductForm>,
) -> Result<Response> {
    let product = resolve_product(&state, &visitor, form.product_id).await?;

    let id = product.id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));

    let snapshot = visitor
        .session
        .lock()
        .await
        .on_add_to_cart_requested(&product)
        .inspect_err(|e| {
            tracing::warn!(product_id = %product.id, error = %e, "Cart refused addition");
        })?;
    tracing::info!(product_id = %product.id, items = snapshot.item_count, "Added to cart");

    Ok(updated(CartView::from(&snapshot)))
}

/// Remove a product's line from the cart (HTMX).
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn remove(visitor: Visitor, Form(form): Form<CartProductForm>) -> Response {
    let id = form.product_id.to_string();
    add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));

    let snapshot = visitor
        .session
        .lock()
        .await
        .on_remove_from_cart_requested(form.product_id);

    updated(CartView::from(&snapshot))
}
