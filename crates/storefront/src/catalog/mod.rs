//! Catalog service client.
//!
//! # Architecture
//!
//! - Read-only JSON queries over `reqwest`
//! - The catalog service is the source of truth: no local copy, no caching,
//!   no retries. A failed call is reported once and the caller keeps
//!   whatever it was showing.
//!
//! # Queries
//!
//! | Method | Path | Response field |
//! |---|---|---|
//! | [`CatalogClient::list_categories`] | `categories` | `categories` |
//! | [`CatalogClient::list_all_products`] | `plants` | `plants` |
//! | [`CatalogClient::list_products_by_category`] | `category/{id}` | `plants` |
//! | [`CatalogClient::get_product`] | `plant/{id}` | `plants` (single object) |
//!
//! # Example
//!
//! ```rust,ignore
//! use greenleaf_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//! let categories = client.list_categories().await?;
//! let plants = client.list_products_by_category(categories[0].id).await?;
//! ```

mod conversions;
pub mod types;

use std::sync::Arc;

use greenleaf_core::{Category, CategoryId, CategorySelection, Product, ProductId};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;

use conversions::{convert_category, convert_plant, convert_plants};
use types::{CATEGORIES_FIELD, CategoryData, PLANTS_FIELD, PlantData};

/// Maximum number of body characters kept in logs and error messages.
const BODY_EXCERPT_CHARS: usize = 200;

/// Errors that can occur when querying the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport or connection failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The payload is not JSON or lacks the expected fields.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The service answered with a non-success status.
    #[error("Catalog service returned {status}: {message}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Start of the response body.
        message: String,
    },

    /// A query path could not be joined onto the base URL.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Client for the catalog service.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
            }),
        }
    }

    /// Fetch `path` and deserialize the top-level `field` of its JSON body.
    async fn fetch_field<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &'static str,
    ) -> Result<T, CatalogError> {
        let url = self.inner.base_url.join(path)?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&response_text),
                "Catalog service returned non-success status"
            );
            return Err(CatalogError::Service {
                status: status.as_u16(),
                message: excerpt(&response_text),
            });
        }

        let mut body: serde_json::Value = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&response_text),
                "Failed to parse catalog response"
            );
            CatalogError::MalformedResponse(format!("invalid JSON: {e}"))
        })?;

        let value = body
            .get_mut(field)
            .map(serde_json::Value::take)
            .filter(|v| !v.is_null())
            .ok_or_else(|| {
                tracing::error!(
                    field,
                    body = %excerpt(&response_text),
                    "Catalog response is missing expected field"
                );
                CatalogError::MalformedResponse(format!("missing field `{field}`"))
            })?;

        serde_json::from_value(value).map_err(|e| {
            tracing::error!(field, error = %e, "Catalog response field has unexpected shape");
            CatalogError::MalformedResponse(format!("field `{field}`: {e}"))
        })
    }

    /// List every category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload has no category list.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let data: Vec<CategoryData> = self.fetch_field("categories", CATEGORIES_FIELD).await?;
        debug!(count = data.len(), "Fetched categories");
        Ok(data.into_iter().map(convert_category).collect())
    }

    /// List every product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload has no plant list.
    #[instrument(skip(self))]
    pub async fn list_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        let data: Vec<PlantData> = self.fetch_field("plants", PLANTS_FIELD).await?;
        debug!(count = data.len(), "Fetched all plants");
        convert_plants(data)
    }

    /// List the products of one category.
    ///
    /// The id is forwarded as-is; an unknown id yields whatever the service
    /// returns for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload has no plant list.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn list_products_by_category(
        &self,
        id: CategoryId,
    ) -> Result<Vec<Product>, CatalogError> {
        let data: Vec<PlantData> = self
            .fetch_field(&format!("category/{id}"), PLANTS_FIELD)
            .await?;
        debug!(count = data.len(), "Fetched category plants");
        convert_plants(data)
    }

    /// List the products for a category selection.
    ///
    /// # Errors
    ///
    /// See [`Self::list_all_products`] and [`Self::list_products_by_category`].
    pub async fn list_products(
        &self,
        selection: CategorySelection,
    ) -> Result<Vec<Product>, CatalogError> {
        match selection {
            CategorySelection::All => self.list_all_products().await,
            CategorySelection::Category(id) => self.list_products_by_category(id).await,
        }
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload has no plant.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let data: PlantData = self.fetch_field(&format!("plant/{id}"), PLANTS_FIELD).await?;
        convert_plant(data)
    }
}

/// First few characters of a response body.
fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
