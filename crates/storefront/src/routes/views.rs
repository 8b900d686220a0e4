//! Display data for templates.
//!
//! Prices are preformatted (`৳500`) and optional text has its fallback
//! applied here, so templates only print fields.

use greenleaf_core::{Batch, CartLine, CartSnapshot, Category, CategorySelection, Product};

/// Characters of description shown on a product card.
pub const CARD_EXCERPT_CHARS: usize = 60;

/// Product card in the grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub excerpt: String,
    pub category: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            excerpt: product
                .description_excerpt(CARD_EXCERPT_CHARS)
                .unwrap_or("No description")
                .to_string(),
            category: product.category.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Product detail modal.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product
                .description
                .clone()
                .unwrap_or_else(|| "No description available.".to_string()),
            category: product.category.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Products appended to the grid, plus whether to offer "load more".
#[derive(Clone)]
pub struct BatchView {
    pub products: Vec<ProductCardView>,
    pub has_more: bool,
}

impl From<&Batch> for BatchView {
    fn from(batch: &Batch) -> Self {
        Self {
            products: batch.products.iter().map(ProductCardView::from).collect(),
            has_more: batch.has_more,
        }
    }
}

/// Category button in the sidebar.
#[derive(Clone)]
pub struct CategoryView {
    /// Path segment for `/categories/{selection}`.
    pub selection: String,
    pub label: String,
    pub active: bool,
}

impl CategoryView {
    /// The "All Plants" button followed by one button per category.
    #[must_use]
    pub fn list(categories: &[Category], active: CategorySelection) -> Vec<Self> {
        std::iter::once(Self {
            selection: CategorySelection::All.to_string(),
            label: "All Plants".to_string(),
            active: active == CategorySelection::All,
        })
        .chain(categories.iter().map(|c| Self {
            selection: c.id.to_string(),
            label: c.label.clone(),
            active: active.is(c.id),
        }))
        .collect()
    }
}

/// Cart line in the cart summary.
#[derive(Clone)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub qty: u32,
    pub line_total: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id().to_string(),
            name: line.product.name.clone(),
            price: line.product.price.to_string(),
            qty: line.qty,
            line_total: line.line_total().to_string(),
        }
    }
}

/// Cart summary.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&CartSnapshot> for CartView {
    fn from(snapshot: &CartSnapshot) -> Self {
        Self {
            lines: snapshot.lines.iter().map(CartLineView::from).collect(),
            total: snapshot.total.to_string(),
            item_count: snapshot.item_count,
        }
    }
}
