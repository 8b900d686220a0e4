//! Product grid and detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use greenleaf_core::{CategorySelection, ProductId};
use tracing::instrument;

use super::views::{BatchView, ProductDetailView};
use super::{QueryOutcome, resolve_product, run_category_query};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::Visitor;
use crate::state::AppState;

/// Product cards plus the "load more" button (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_batch.html")]
pub struct ProductBatchTemplate {
    pub batch: BatchView,
}

/// Product detail modal (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_detail.html")]
pub struct ProductDetailTemplate {
    pub product: ProductDetailView,
}

/// Switch the grid to a category (or "all") and return its first batch.
///
/// Responds `204 No Content` if a newer selection overtook this one, so the
/// browser keeps the newer grid.
#[instrument(skip(state, visitor), fields(visitor_id = %visitor.id))]
pub async fn select_category(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(selection): Path<String>,
) -> Result<Response> {
    let selection = selection
        .parse::<CategorySelection>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let label = selection.to_string();
    add_breadcrumb("catalog", "Selected category", Some(&[("selection", label.as_str())]));

    match run_category_query(&state, &visitor, selection).await? {
        QueryOutcome::Applied(batch) => Ok(ProductBatchTemplate {
            batch: BatchView::from(&batch),
        }
        .into_response()),
        QueryOutcome::Superseded => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Reveal the next batch of the current grid.
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn load_more(visitor: Visitor) -> ProductBatchTemplate {
    let batch = visitor.session.lock().await.on_load_more_requested();
    tracing::debug!(count = batch.products.len(), has_more = batch.has_more, "Loaded more products");
    ProductBatchTemplate {
        batch: BatchView::from(&batch),
    }
}

/// Display the product detail modal.
#[instrument(skip(state, visitor), fields(visitor_id = %visitor.id))]
pub async fn show(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(id): Path<ProductId>,
) -> Result<ProductDetailTemplate> {
    let product = resolve_product(&state, &visitor, id).await?;
    Ok(ProductDetailTemplate {
        product: ProductDetailView::from(&product),
    })
}
