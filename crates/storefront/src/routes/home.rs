//! Storefront page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use greenleaf_core::{Batch, CategorySelection};
use tracing::instrument;

use super::views::{BatchView, CartView, CategoryView};
use super::{QueryOutcome, report_catalog_error, run_category_query};
use crate::middleware::Visitor;
use crate::state::AppState;

/// Storefront page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub categories: Vec<CategoryView>,
    pub batch: BatchView,
    pub cart: CartView,
}

/// Display the storefront page.
///
/// Loads the category list and the first batch of all products. A failed
/// catalog query is reported and its part of the page renders empty.
#[instrument(skip(state, visitor), fields(visitor_id = %visitor.id))]
pub async fn home(State(state): State<AppState>, visitor: Visitor) -> HomeTemplate {
    let categories = match state.catalog().list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            report_catalog_error("list categories", &e);
            Vec::new()
        }
    };

    let batch = match run_category_query(&state, &visitor, CategorySelection::All).await {
        Ok(QueryOutcome::Applied(batch)) => batch,
        Ok(QueryOutcome::Superseded) => Batch::empty(),
        Err(e) => {
            report_catalog_error("list all products", &e);
            Batch::empty()
        }
    };

    let session = visitor.session.lock().await;
    HomeTemplate {
        categories: CategoryView::list(&categories, session.active_selection()),
        batch: BatchView::from(&batch),
        cart: CartView::from(&session.cart_snapshot()),
    }
}
