//! Wire types for catalog service payloads.
//!
//! These mirror the JSON the service returns and are converted into
//! `greenleaf_core` types before leaving this module tree.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Response field holding the category list.
pub const CATEGORIES_FIELD: &str = "categories";

/// Response field holding plant data (a list, or a single object for detail queries).
pub const PLANTS_FIELD: &str = "plants";

/// A category entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryData {
    pub id: i64,
    #[serde(alias = "category")]
    pub category_name: String,
    #[serde(default)]
    pub small_description: Option<String>,
}

/// A plant entry.
#[derive(Debug, Clone, Deserialize)]
pub struct PlantData {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    /// Number or numeric string.
    pub price: Decimal,
    pub image: String,
}
