//! Catalog entities as the storefront sees them.
//!
//! Products and categories are owned by the external catalog service and
//! never mutated here.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, Price, ProductId};

/// A plant offered by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description, if the catalog has one.
    pub description: Option<String>,
    /// Category label (not the category id).
    pub category: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// Description cut to at most `max_chars` characters.
    ///
    /// Returns `None` when the product has no description.
    #[must_use]
    pub fn description_excerpt(&self, max_chars: usize) -> Option<&str> {
        let description = self.description.as_deref()?;
        let end = description
            .char_indices()
            .nth(max_chars)
            .map_or(description.len(), |(idx, _)| idx);
        description.get(..end)
    }
}

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Catalog identifier, used to query products.
    pub id: CategoryId,
    /// Display label.
    pub label: String,
    /// Short description, if the catalog has one.
    pub description: Option<String>,
}

/// Error parsing a [`CategorySelection`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid category selection: {0:?}")]
pub struct SelectionError(pub String);

/// Which product set the visitor is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategorySelection {
    /// Every product in the catalog.
    #[default]
    All,
    /// Products of a single category.
    Category(CategoryId),
}

impl CategorySelection {
    /// Path segment used for the "all products" selection.
    pub const ALL: &'static str = "all";

    /// Whether this selection is the given category.
    #[must_use]
    pub fn is(&self, id: CategoryId) -> bool {
        *self == Self::Category(id)
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Category(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for CategorySelection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(Self::ALL) {
            return Ok(Self::All);
        }
        s.parse::<CategoryId>()
            .map(Self::Category)
            .map_err(|_| SelectionError(s.to_string()))
    }
}
